use crate::constants::STACK_CAPACITY;
use crate::error::StackFault;

/// # Call Stack
/// Return addresses saved by `2nnn` and restored by `00EE`, most recent last.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallStack {
    frames: [u16; STACK_CAPACITY],
    depth: usize,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            frames: [0; STACK_CAPACITY],
            depth: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<(), StackFault> {
        if self.depth == STACK_CAPACITY {
            return Err(StackFault::Overflow);
        }
        self.frames[self.depth] = addr;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, StackFault> {
        if self.depth == 0 {
            return Err(StackFault::Underflow);
        }
        self.depth -= 1;
        Ok(self.frames[self.depth])
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Saved return addresses, oldest first.
    pub fn frames(&self) -> &[u16] {
        &self.frames[..self.depth]
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new()
    }
}
