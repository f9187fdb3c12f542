use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [row][col]; each cell is 0 (off) or 1 (on).
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Display Buffer
/// The 64x32 monochrome screen as seen by the interpreter.
///
/// Sprites are XORed onto it. Pixels that would land past the right or bottom edge are
/// dropped rather than wrapped around.
#[derive(Copy, Clone)]
pub struct DisplayBuffer {
    pixels: FrameBuffer,
}

impl DisplayBuffer {
    pub fn new() -> Self {
        DisplayBuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// XORs `sprite` onto the screen with its top-left corner at (`origin_row`, `origin_col`).
    ///
    /// Each byte is one 8-pixel row, most significant bit leftmost.
    /// Returns true if any lit pixel was turned off.
    pub fn blit(&mut self, origin_row: usize, origin_col: usize, sprite: &[u8]) -> bool {
        let mut collided = false;
        for (offset, byte) in sprite.iter().enumerate() {
            let row = origin_row + offset;
            if row >= DISPLAY_HEIGHT {
                continue;
            }
            for bit in 0..8 {
                let col = origin_col + bit;
                if col >= DISPLAY_WIDTH {
                    continue;
                }
                let pixel = (byte >> (7 - bit)) & 1;
                let old = self.pixels[row][col];
                collided |= old & pixel == 1;
                self.pixels[row][col] = old ^ pixel;
            }
        }
        collided
    }

    pub fn pixel(&self, row: usize, col: usize) -> bool {
        self.pixels[row][col] == 1
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.pixels
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().flatten().filter(|p| **p == 1).count()
    }

    #[cfg(test)]
    pub(crate) fn set_pixel(&mut self, row: usize, col: usize, on: bool) {
        self.pixels[row][col] = u8::from(on);
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}
