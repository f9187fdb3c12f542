use thiserror::Error;

use crate::constants::MAX_PROGRAM_SIZE;

/// Failures while placing a program image into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program image is {size} bytes but at most {max} fit in memory")]
    ImageTooLarge { size: usize, max: usize },

    #[error("unable to read program image: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub(crate) fn too_large(size: usize) -> Self {
        LoadError::ImageTooLarge {
            size,
            max: MAX_PROGRAM_SIZE,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MemoryFault {
    #[error("memory access out of range at address {address:#06X}")]
    AddressOutOfRange { address: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StackFault {
    #[error("call stack overflow: subroutines nested too deeply")]
    Overflow,

    #[error("call stack underflow: returned with no subroutine to return to")]
    Underflow,
}

/// A fatal condition that halts interpretation.
///
/// The machine keeps its state as it was when the faulting instruction was fetched
/// so that the host can inspect it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error(transparent)]
    Memory(#[from] MemoryFault),

    #[error(transparent)]
    Stack(#[from] StackFault),
}
