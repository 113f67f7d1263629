use crate::constants::{FONT_START, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Chip8Error, Result};

/// # Memory
/// 4096 bytes, laid out as:
///   0x000-0x04f  sprite sheet for the hex digits
///   0x050-0x1ff  unused (zero)
///   0x200-0xfff  program
///
/// Every access is bounds checked; nothing wraps.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// Zeroed memory with the sprite sheet installed
    pub fn new() -> Self {
        let mut bytes = Box::new([0; MEMORY_SIZE]);
        let font = FONT_START as usize;
        bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    /// Copies a program into memory at `PROGRAM_START`
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: program.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.write_slice(PROGRAM_START, program)
    }

    pub fn read(&self, addr: u16) -> Result<u8> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Chip8Error::MemoryOutOfRange {
                address: addr as usize,
            })
    }

    /// Reads the big-endian word at `addr..addr + 2`
    pub fn read_word(&self, addr: u16) -> Result<u16> {
        let word = self.read_slice(addr, 2)?;
        Ok(u16::from(word[0]) << 8 | u16::from(word[1]))
    }

    pub fn read_slice(&self, addr: u16, len: usize) -> Result<&[u8]> {
        let range = Self::range(addr, len)?;
        Ok(&self.bytes[range])
    }

    pub fn write(&mut self, addr: u16, value: u8) -> Result<()> {
        self.write_slice(addr, &[value])
    }

    pub fn write_slice(&mut self, addr: u16, data: &[u8]) -> Result<()> {
        let range = Self::range(addr, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// The whole address space, for inspection
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }

    fn range(addr: u16, len: usize) -> Result<std::ops::Range<usize>> {
        let start = addr as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            // report the first byte that doesn't exist
            return Err(Chip8Error::MemoryOutOfRange {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_sheet_installed() {
        let m = Memory::new();
        assert_eq!(m.read_slice(FONT_START, 80).unwrap(), &SPRITE_SHEET[..]);
    }

    #[test]
    fn test_memory_zeroed_after_font() {
        let m = Memory::new();
        assert!(m.as_slice()[SPRITE_SHEET.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_program() {
        let mut m = Memory::new();
        m.load_program(&[0x00, 0xE0]).unwrap();
        assert_eq!(m.read_slice(0x200, 2).unwrap(), &[0x00, 0xE0]);
    }

    #[test]
    fn test_load_program_that_fills_memory() {
        let mut m = Memory::new();
        let program = vec![0xAA; MAX_ROM_SIZE];
        m.load_program(&program).unwrap();
        assert_eq!(m.read(0xFFF).unwrap(), 0xAA);
    }

    #[test]
    fn test_load_program_too_large() {
        let mut m = Memory::new();
        let program = vec![0xAA; MAX_ROM_SIZE + 1];
        assert_eq!(
            m.load_program(&program),
            Err(Chip8Error::RomTooLarge {
                size: MAX_ROM_SIZE + 1,
                max: MAX_ROM_SIZE,
            })
        );
        // nothing was written
        assert_eq!(m.read(0x200).unwrap(), 0x00);
    }

    #[test]
    fn test_read_word() {
        let mut m = Memory::new();
        m.write_slice(0x300, &[0xAA, 0xBB]).unwrap();
        assert_eq!(m.read_word(0x300).unwrap(), 0xAABB);
    }

    #[test]
    fn test_read_word_past_end() {
        let m = Memory::new();
        assert_eq!(
            m.read_word(0xFFF),
            Err(Chip8Error::MemoryOutOfRange { address: 0x1000 })
        );
    }

    #[test]
    fn test_read_out_of_range() {
        let m = Memory::new();
        assert_eq!(
            m.read(0x1000),
            Err(Chip8Error::MemoryOutOfRange { address: 0x1000 })
        );
    }

    #[test]
    fn test_write_slice_out_of_range_writes_nothing() {
        let mut m = Memory::new();
        assert!(m.write_slice(0xFFE, &[1, 2, 3]).is_err());
        assert_eq!(m.read_slice(0xFFE, 2).unwrap(), &[0, 0]);
    }
}
