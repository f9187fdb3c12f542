//! # vm8
//!
//! An interpreter for the 16-bit-opcode, 8-bit-register virtual machine with a 64x32
//! monochrome display usually known as CHIP-8.
//!
//! The crate is only the machine: it never opens a window, plays a sound or reads a
//! keyboard. Hosts drive it by calling [`Machine::step`] at their chosen clock speed and
//! [`Machine::tick_timers`] at 60Hz, feeding it logical key presses and drawing
//! [`Machine::frame`].
//!
//! ```
//! use vm8_core::Machine;
//!
//! let mut machine = Machine::new();
//! // LD V0, 0x05; ADD V0, 0x05
//! machine.load(&[0x60, 0x05, 0x70, 0x05]).unwrap();
//! machine.step().unwrap();
//! machine.step().unwrap();
//!
//! assert_eq!(machine.registers().v[0x0], 10);
//! assert_eq!(machine.registers().pc, 0x204);
//! ```

pub use display::{DisplayBuffer, FrameBuffer};
pub use error::{Fault, LoadError, MemoryFault, StackFault};
pub use instruction::Instruction;
pub use keypad::{KeyState, Keypad};
pub use machine::{Machine, MachineConfig};
pub use memory::Memory;
pub use opcode::Opcode;
pub use operations::StepOutcome;
pub use registers::Registers;
pub use stack::CallStack;
pub use state::State;

pub mod constants;
mod display;
mod error;
mod instruction;
mod keypad;
mod machine;
mod memory;
mod opcode;
mod operations;
mod registers;
mod stack;
mod state;
