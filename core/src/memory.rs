use crate::constants::{FONT_START, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Fault, RomError};

/// # Memory
/// 4096 bytes of byte-addressable memory.
///
/// ```text
/// 0x000 - 0x04F  unused
/// 0x050 - 0x09F  font sprite sheet (16 glyphs x 5 bytes)
/// 0x0A0 - 0x1FF  unused
/// 0x200 - 0xFFF  program and free space
/// ```
///
/// All access outside the interpreter's own fetch goes through the checked accessors;
/// an address past 0xFFF is a `Fault::AddressOutOfRange`, never a wrap.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet in place
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.reset();
        memory
    }

    /// Zero every cell and write the sprite sheet at `FONT_START`
    pub fn reset(&mut self) {
        self.bytes = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        self.bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
    }

    /// Number of bytes available to a program
    pub const fn capacity() -> usize {
        MEMORY_SIZE - PROGRAM_START as usize
    }

    /// Copy a program into memory starting at `PROGRAM_START`.
    ///
    /// Memory is left untouched if the program doesn't fit.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), RomError> {
        let capacity = Self::capacity();
        if program.len() > capacity {
            return Err(RomError::TooLarge {
                size: program.len(),
                capacity,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, addr: usize) -> Result<u8, Fault> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(Fault::AddressOutOfRange { addr })
    }

    pub fn write(&mut self, addr: usize, value: u8) -> Result<(), Fault> {
        let cell = self
            .bytes
            .get_mut(addr)
            .ok_or(Fault::AddressOutOfRange { addr })?;
        *cell = value;
        Ok(())
    }

    /// Big-endian 16-bit word at `addr` and `addr + 1`
    pub fn word(&self, addr: u16) -> Result<u16, Fault> {
        let addr = addr as usize;
        let hi = u16::from(self.read(addr)?);
        let lo = u16::from(self.read(addr + 1)?);
        Ok(hi << 8 | lo)
    }

    /// `len` bytes starting at `addr`.
    /// Fails with the first address past the end if the range doesn't fit.
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8], Fault> {
        check_range(addr, len)?;
        Ok(&self.bytes[addr..addr + len])
    }

    /// Mutable counterpart to `slice`. Nothing is written if the range doesn't fit.
    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8], Fault> {
        check_range(addr, len)?;
        Ok(&mut self.bytes[addr..addr + len])
    }
}

fn check_range(addr: usize, len: usize) -> Result<(), Fault> {
    if addr + len > MEMORY_SIZE {
        Err(Fault::AddressOutOfRange {
            addr: addr.max(MEMORY_SIZE),
        })
    } else {
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
