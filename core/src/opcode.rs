use crate::state::Register;

/// # Opcodes
///
/// Instructions are 16-bit words fetched high byte first. The top nibble picks
/// one of 16 instruction classes; whatever else is needed comes from the rest:
/// - `(_, x, _, _)` a register Vx, or the last register of the range V0..=Vx
/// - `(_, _, y, _)` a register Vy
/// - `(_, _, _, n)` a sprite height, or the variant within class 0x8
/// - `(_, _, k, k)` a byte operand, or the variant within classes 0xE and 0xF
/// - `(_, n, n, n)` a 12-bit address
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The instruction class.
    /// `[c___]`
    fn class(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> Register;

    /// `[__y_]`
    fn y(&self) -> Register;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (
            self.class(),
            ((self >> 8) & 0xF) as u8,
            ((self >> 4) & 0xF) as u8,
            self.n(),
        )
    }

    fn class(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> Register {
        Register::from_nibble((self >> 8) as u8)
    }

    fn y(&self) -> Register {
        Register::from_nibble((self >> 4) as u8)
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}
