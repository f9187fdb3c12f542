/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Programs are loaded at, and execution starts from, this address.
pub const PROGRAM_START: u16 = 0x200;

/// The largest program image that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Each opcode is two bytes wide; also the distance a skip jumps over.
pub const OPCODE_SIZE: u16 = 2;

pub const REGISTER_COUNT: usize = 16;

/// Index of VF, the carry/borrow/collision flag register.
pub const FLAG_REGISTER: usize = 0xF;

/// Maximum subroutine nesting depth.
pub const STACK_CAPACITY: usize = 16;

pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Number of past states kept for rewinding by default.
pub const MAX_SAVED_STATES: usize = 600;

/// Instructions executed per second by a host that doesn't say otherwise.
pub const CLOCK_SPEED: u32 = 500;

/// Rate at which hosts should call `tick_timers`.
pub const TIMER_FREQUENCY: u32 = 60;

/// Bytes per font glyph; glyph `d` lives at `d * GLYPH_SIZE`.
pub const GLYPH_SIZE: usize = 5;

/// # Font
/// Sixteen 4x5 glyphs for the hex digits 0..F, installed at address 0.
///
/// Each byte is one row of a glyph; only the high nibble is lit.
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
#[rustfmt::skip]
pub const FONT_SET: [u8; 16 * GLYPH_SIZE] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
