use std::fmt;

use thiserror::Error;

/// Everything that can stop a Chip-8 program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Chip8Error {
    /// `0nnn` machine code routines; only the original COSMAC VIP could run them
    #[error("unimplemented instruction {0:#06X}")]
    UnimplementedInstruction(u16),

    /// A known instruction class whose remaining nibbles select no operation
    #[error("invalid variant of instruction {0:#06X}")]
    InvalidVariant(u16),

    #[error("returned from a subroutine with an empty call stack")]
    StackUnderflow,

    #[error("call stack overflowed")]
    StackOverflow,

    #[error("memory access out of range at {address:#06X}")]
    MemoryOutOfRange { address: usize },

    #[error("ROM is {size} bytes but at most {max} fit in memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("a ROM has already been loaded")]
    RomAlreadyLoaded,

    #[error("no ROM has been loaded")]
    NoRomLoaded,

    #[error("key {0:#04X} is not on the keypad")]
    InvalidKey(u8),
}

/// A fatal error raised while executing the instruction at `pc`.
///
/// `word` is `None` when the instruction couldn't be fetched at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    pub pc: u16,
    pub word: Option<u16>,
    pub error: Chip8Error,
}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.word {
            Some(word) => write!(f, "{} (op {:04X} at pc {:04X})", self.error, word, self.pc),
            None => write!(f, "{} (at pc {:04X})", self.error, self.pc),
        }
    }
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
