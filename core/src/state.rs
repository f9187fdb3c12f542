use crate::display::DisplayBuffer;
use crate::error::MemoryFault;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::stack::CallStack;

/// A snapshot of the whole machine
///
/// ## CPU
/// - `registers` V0..VF, I, the program counter and both timers
/// - `stack` return addresses of the subroutines currently being executed
///
/// ## Memory
/// - `memory` 4096 bytes holding the font and the loaded program
/// - `display` the 64x32 frame buffer
///
/// ## Bookkeeping
/// - `draw_flag` set whenever the display changes, until the host takes the frame
///
/// States are plain values: copying one is how the machine saves history for rewinding.
#[derive(Copy, Clone)]
pub struct State {
    pub registers: Registers,
    pub stack: CallStack,
    pub memory: Memory,
    pub display: DisplayBuffer,
    pub draw_flag: bool,
}

impl State {
    /// Power-on state: registers zeroed, PC at 0x200, stack empty, display clear
    /// and memory zeroed except for the font.
    pub fn new() -> Self {
        State {
            registers: Registers::new(),
            stack: CallStack::new(),
            memory: Memory::new(),
            display: DisplayBuffer::new(),
            draw_flag: false,
        }
    }

    /// Power-on state that keeps this state's memory (and so its program).
    pub fn reset(&self) -> Self {
        State {
            memory: self.memory,
            ..State::new()
        }
    }

    /// Gets the opcode currently pointed at by the pc.
    pub fn fetch(&self) -> Result<u16, MemoryFault> {
        self.memory.read_word(self.registers.pc as usize)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
