use crate::constants::{FONT_SET, MEMORY_SIZE, PROGRAM_START};
use crate::error::{LoadError, MemoryFault};

/// # Memory
/// 4096 bytes of flat, byte-addressable memory.
///
/// ```text
/// 0x000..0x050  font glyphs for 0..F (5 bytes each)
/// 0x050..0x200  unused
/// 0x200..0x1000 program image
/// ```
///
/// Nothing stops a program from writing over its own font.
#[derive(Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the font installed.
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.install_font();
        memory
    }

    /// Writes the built-in glyphs to 0x000..0x050.
    pub fn install_font(&mut self) {
        self.bytes[..FONT_SET.len()].copy_from_slice(&FONT_SET);
    }

    /// Copies a program image into memory starting at `PROGRAM_START`.
    ///
    /// Bytes past the end of the image are left as they were.
    pub fn load(&mut self, image: &[u8]) -> Result<(), LoadError> {
        let start = PROGRAM_START as usize;
        if start + image.len() > MEMORY_SIZE {
            return Err(LoadError::too_large(image.len()));
        }
        self.bytes[start..start + image.len()].copy_from_slice(image);
        Ok(())
    }

    pub fn read(&self, addr: usize) -> Result<u8, MemoryFault> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(MemoryFault::AddressOutOfRange { address: addr })
    }

    pub fn write(&mut self, addr: usize, value: u8) -> Result<(), MemoryFault> {
        match self.bytes.get_mut(addr) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(MemoryFault::AddressOutOfRange { address: addr }),
        }
    }

    /// Reads the big-endian word at `addr..addr + 2`.
    pub fn read_word(&self, addr: usize) -> Result<u16, MemoryFault> {
        let high = u16::from(self.read(addr)?);
        let low = u16::from(self.read(addr + 1)?);
        Ok(high << 8 | low)
    }

    /// Borrows `len` bytes starting at `addr`, failing on the first address past the end.
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8], MemoryFault> {
        self.check_range(addr, len)?;
        Ok(&self.bytes[addr..addr + len])
    }

    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8], MemoryFault> {
        self.check_range(addr, len)?;
        Ok(&mut self.bytes[addr..addr + len])
    }

    fn check_range(&self, addr: usize, len: usize) -> Result<(), MemoryFault> {
        if addr + len > MEMORY_SIZE {
            let address = addr.max(MEMORY_SIZE);
            return Err(MemoryFault::AddressOutOfRange { address });
        }
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
