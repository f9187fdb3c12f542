use crate::constants::{FLAG_REGISTER, PROGRAM_START, REGISTER_COUNT};

/// # Registers
/// - (v) 16 8-bit registers V0..VF
///     - V0..VE are general purpose
///     - VF is overwritten with the carry, borrow, shifted-out bit or collision flag
/// - (i) a 16-bit address register
/// - (pc) a 16-bit program counter
/// - 2 8-bit timers (delay & sound), decremented by the host at 60Hz
///
/// Arithmetic on these wraps silently; callers pick `wrapping_*` operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            delay_timer: 0,
            sound_timer: 0,
        }
    }

    /// Vx, where `x` is a nibble taken from an opcode.
    pub fn get(&self, x: u8) -> u8 {
        self.v[x as usize & 0xF]
    }

    pub fn set(&mut self, x: u8, value: u8) {
        self.v[x as usize & 0xF] = value;
    }

    pub fn flag(&self) -> u8 {
        self.v[FLAG_REGISTER]
    }

    pub fn set_flag(&mut self, set: bool) {
        self.v[FLAG_REGISTER] = u8::from(set);
    }

    /// Decrements each nonzero timer by one.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
