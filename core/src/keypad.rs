use crate::constants::KEY_COUNT;

/// Answers whether a logical key 0x0..0xF is held down.
///
/// The interpreter only ever asks about logical keys; mapping physical keys onto them
/// is up to the host.
pub trait KeyState {
    fn is_pressed(&self, key: u8) -> bool;

    /// The lowest-numbered key currently held, if any.
    fn first_pressed(&self) -> Option<u8> {
        (0..KEY_COUNT as u8).find(|key| self.is_pressed(*key))
    }
}

/// # Keypad
/// The pressed status of the 16 hex keys.
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys above 0xF don't exist and are ignored.
    pub fn press(&mut self, key: u8) {
        if let Some(k) = self.pressed.get_mut(key as usize) {
            *k = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(k) = self.pressed.get_mut(key as usize) {
            *k = false;
        }
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }
}

impl KeyState for Keypad {
    fn is_pressed(&self, key: u8) -> bool {
        self.pressed.is_pressed(key)
    }
}

impl KeyState for [bool; KEY_COUNT] {
    fn is_pressed(&self, key: u8) -> bool {
        self.get(key as usize).copied().unwrap_or(false)
    }
}
