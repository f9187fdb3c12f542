use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};
use thiserror::Error;

const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.25;

/// A square wave, which is about as close to the original buzzer as it gets
struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for x in out.iter_mut() {
            *x = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("audio subsystem unavailable: {0}")]
    Subsystem(String),

    #[error("unable to open playback device: {0}")]
    Device(String),
}

/// # Beeper
/// Plays a tone while the sound timer runs.
pub struct Beeper {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl Beeper {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, AudioError> {
        let audio_subsystem = sdl.audio().map_err(AudioError::Subsystem)?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio_subsystem
            .open_playback(None, &desired, |obtained| SquareWave {
                phase_inc: TONE_HZ / obtained.freq as f32,
                phase: 0.0,
                volume: VOLUME,
            })
            .map_err(AudioError::Device)?;
        Ok(Beeper {
            device,
            playing: false,
        })
    }

    pub fn set_playing(&mut self, playing: bool) {
        if playing == self.playing {
            return;
        }
        if playing {
            self.device.resume();
        } else {
            self.device.pause();
        }
        self.playing = playing;
    }
}
