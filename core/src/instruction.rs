use std::fmt;

use crate::error::{Chip8Error, Result};
use crate::opcode::Opcode;
use crate::state::Register;

/// The register-to-register operations of class 0x8, keyed by the low nibble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    /// Vx = Vy
    Move,
    /// Vx |= Vy
    Or,
    /// Vx &= Vy
    And,
    /// Vx ^= Vy
    Xor,
    /// Vx += Vy; VF = carry
    Add,
    /// Vx -= Vy; VF = !borrow
    Sub,
    /// Vx >>= 1; VF = bit shifted out
    Shr,
    /// Vx = Vy - Vx; VF = !borrow
    Subn,
    /// Vx <<= 1; VF = bit shifted out
    Shl,
}

/// A decoded instruction with its operands extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clr,
    /// 00EE
    Rts,
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    Ske { x: Register, kk: u8 },
    /// 4xkk
    Skne { x: Register, kk: u8 },
    /// 5xy0
    Skre { x: Register, y: Register },
    /// 6xkk
    Load { x: Register, kk: u8 },
    /// 7xkk
    Add { x: Register, kk: u8 },
    /// 8xyN
    Alu { op: AluOp, x: Register, y: Register },
    /// 9xy0
    Skrne { x: Register, y: Register },
    /// Annn
    Loadi { addr: u16 },
    /// Bnnn
    Jumpi { addr: u16 },
    /// Cxkk
    Rand { x: Register, kk: u8 },
    /// Dxyn
    Draw { x: Register, y: Register, n: u8 },
    /// Ex9E
    Skpr { x: Register },
    /// ExA1
    Skup { x: Register },
    /// Fx07
    Moved { x: Register },
    /// Fx0A
    Keyd { x: Register },
    /// Fx15
    Loadd { x: Register },
    /// Fx18
    Loads { x: Register },
    /// Fx1E
    Addi { x: Register },
    /// Fx29
    Ldspr { x: Register },
    /// Fx33
    Bcd { x: Register },
    /// Fx55
    Stor { x: Register },
    /// Fx65
    Read { x: Register },
}

/// Selects the Instruction for an Opcode.
///
/// Every class is known, so anything that doesn't decode is either a `0nnn`
/// machine code routine or a bad variant of a known class.
pub fn decode(op: u16) -> Result<Instruction> {
    use Instruction::*;

    let (x, y) = (op.x(), op.y());
    let instruction = match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => Clr,
        (0x0, 0x0, 0xE, 0xE) => Rts,
        (0x0, ..) => return Err(Chip8Error::UnimplementedInstruction(op)),
        (0x1, ..) => Jump { addr: op.addr() },
        (0x2, ..) => Call { addr: op.addr() },
        (0x3, ..) => Ske { x, kk: op.kk() },
        (0x4, ..) => Skne { x, kk: op.kk() },
        (0x5, .., 0x0) => Skre { x, y },
        (0x6, ..) => Load { x, kk: op.kk() },
        (0x7, ..) => Add { x, kk: op.kk() },
        (0x8, .., n) => Alu {
            op: alu_op(n).ok_or(Chip8Error::InvalidVariant(op))?,
            x,
            y,
        },
        (0x9, .., 0x0) => Skrne { x, y },
        (0xA, ..) => Loadi { addr: op.addr() },
        (0xB, ..) => Jumpi { addr: op.addr() },
        (0xC, ..) => Rand { x, kk: op.kk() },
        (0xD, ..) => Draw { x, y, n: op.n() },
        (0xE, .., 0x9, 0xE) => Skpr { x },
        (0xE, .., 0xA, 0x1) => Skup { x },
        (0xF, .., 0x0, 0x7) => Moved { x },
        (0xF, .., 0x0, 0xA) => Keyd { x },
        (0xF, .., 0x1, 0x5) => Loadd { x },
        (0xF, .., 0x1, 0x8) => Loads { x },
        (0xF, .., 0x1, 0xE) => Addi { x },
        (0xF, .., 0x2, 0x9) => Ldspr { x },
        (0xF, .., 0x3, 0x3) => Bcd { x },
        (0xF, .., 0x5, 0x5) => Stor { x },
        (0xF, .., 0x6, 0x5) => Read { x },
        _ => return Err(Chip8Error::InvalidVariant(op)),
    };
    Ok(instruction)
}

fn alu_op(n: u8) -> Option<AluOp> {
    match n {
        0x0 => Some(AluOp::Move),
        0x1 => Some(AluOp::Or),
        0x2 => Some(AluOp::And),
        0x3 => Some(AluOp::Xor),
        0x4 => Some(AluOp::Add),
        0x5 => Some(AluOp::Sub),
        0x6 => Some(AluOp::Shr),
        0x7 => Some(AluOp::Subn),
        0xE => Some(AluOp::Shl),
        _ => None,
    }
}

/// Disassembly, in the usual Cowgod mnemonics
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clr => write!(f, "CLS"),
            Rts => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:03X}", addr),
            Call { addr } => write!(f, "CALL {:03X}", addr),
            Ske { x, kk } => write!(f, "SE {}, {:02X}", x, kk),
            Skne { x, kk } => write!(f, "SNE {}, {:02X}", x, kk),
            Skre { x, y } => write!(f, "SE {}, {}", x, y),
            Load { x, kk } => write!(f, "LD {}, {:02X}", x, kk),
            Add { x, kk } => write!(f, "ADD {}, {:02X}", x, kk),
            Alu { op, x, y } => {
                let mnemonic = match op {
                    AluOp::Move => "LD",
                    AluOp::Or => "OR",
                    AluOp::And => "AND",
                    AluOp::Xor => "XOR",
                    AluOp::Add => "ADD",
                    AluOp::Sub => "SUB",
                    AluOp::Shr => "SHR",
                    AluOp::Subn => "SUBN",
                    AluOp::Shl => "SHL",
                };
                write!(f, "{} {}, {}", mnemonic, x, y)
            }
            Skrne { x, y } => write!(f, "SNE {}, {}", x, y),
            Loadi { addr } => write!(f, "LD I, {:03X}", addr),
            Jumpi { addr } => write!(f, "JP V0, {:03X}", addr),
            Rand { x, kk } => write!(f, "RND {}, {:02X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW {}, {}, {:X}", x, y, n),
            Skpr { x } => write!(f, "SKP {}", x),
            Skup { x } => write!(f, "SKNP {}", x),
            Moved { x } => write!(f, "LD {}, DT", x),
            Keyd { x } => write!(f, "LD {}, K", x),
            Loadd { x } => write!(f, "LD DT, {}", x),
            Loads { x } => write!(f, "LD ST, {}", x),
            Addi { x } => write!(f, "ADD I, {}", x),
            Ldspr { x } => write!(f, "LD F, {}", x),
            Bcd { x } => write!(f, "LD B, {}", x),
            Stor { x } => write!(f, "LD [I], {}", x),
            Read { x } => write!(f, "LD {}, [I]", x),
        }
    }
}
