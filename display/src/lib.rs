use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{TextureValueError, WindowCanvas};
use sdl2::video::WindowBuildError;
use sdl2::IntegerOrSdlError;
use thiserror::Error;

use vm8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vm8_core::FrameBuffer;

/// Bytes per pixel of an RGB24 texture
const BYTES_PER_PIXEL: usize = 3;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("sdl2: {0}")]
    Sdl(String),

    #[error("unable to open window: {0}")]
    Window(#[from] WindowBuildError),

    #[error("unable to create canvas: {0}")]
    Canvas(#[from] IntegerOrSdlError),

    #[error("unable to create texture: {0}")]
    Texture(#[from] TextureValueError),
}

impl From<String> for DisplayError {
    fn from(message: String) -> Self {
        DisplayError::Sdl(message)
    }
}

/// # Display
/// The screen is composed of 64x32 black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array of 64x32 bytes.
/// The display only gets a call to `render` when the FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
    width: usize,
    height: usize,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `title` the window title
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self, DisplayError> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                title,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()?;
        let canvas = window.into_canvas().build()?;

        Ok(Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        })
    }

    /// Formats a FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
    ///
    /// # Arguments
    /// * `frame` a FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|a| a.iter())
            .flat_map(|a| std::iter::repeat(a).take(BYTES_PER_PIXEL))
            .map(|a| a * 255)
            .collect()
    }

    /// Formats the FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            self.width as u32,
            self.height as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame);
        let row_bytes = self.width * BYTES_PER_PIXEL;
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // Rows may be padded out to `pitch` bytes
            for (row, src) in pixels.chunks(row_bytes).enumerate() {
                buffer[row * pitch..row * pitch + row_bytes].copy_from_slice(src);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), DisplayError> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| DisplayError::Sdl(e.to_string()))
    }
}
