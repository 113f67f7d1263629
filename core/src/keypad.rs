use crate::error::{Chip8Error, Result};

/// # Keypad
/// Chip-8 input is a hexadecimal keypad; one bit per key of the keys held down.
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad(u16);

impl Keypad {
    pub fn new() -> Self {
        Keypad(0)
    }

    pub fn press(&mut self, key: u8) -> Result<()> {
        self.0 |= Self::mask(key)?;
        Ok(())
    }

    pub fn release(&mut self, key: u8) -> Result<()> {
        self.0 &= !Self::mask(key)?;
        Ok(())
    }

    /// Values past 0xF name no key, so they are never pressed
    pub fn is_pressed(&self, key: u8) -> bool {
        Self::mask(key).map_or(false, |mask| self.0 & mask != 0)
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    fn mask(key: u8) -> Result<u16> {
        if key > 0xF {
            return Err(Chip8Error::InvalidKey(key));
        }
        Ok(1 << key)
    }
}
