use std::fmt;

use crate::constants::{FLAG_REGISTER, PROGRAM_START};
use crate::framebuffer::FrameBuffer;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::stack::CallStack;

/// One of the sixteen 8-bit registers V0..VF.
///
/// Built from a nibble so an index is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(u8);

impl Register {
    pub const V0: Register = Register(0x0);
    pub const VF: Register = Register(FLAG_REGISTER as u8);

    /// Keeps the low 4 bits of `nibble`
    pub fn from_nibble(nibble: u8) -> Self {
        Register(nibble & 0xF)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{:X}", self.0)
    }
}

/// Whether instructions are being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Suspended by `Fx0A` until a key press is written to the register
    AwaitingKey(Register),
}

/// The whole Chip-8 machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented at 60Hz
/// - a tone plays while the sound timer is non-zero
///
/// ## Memory
/// - 4096 bytes of addressable memory, font at 0x000 and program at 0x200
/// - a call stack of up to 24 return addresses
/// - a 64x32 frame buffer
///
/// ## Input
/// - a bitmask of the keys 0..F currently held
/// - dispatch halts while a key's value is owed to some register
#[derive(Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: CallStack,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keypad: Keypad,
    pub run_state: RunState,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            delay_timer: 0,
            sound_timer: 0,
            stack: CallStack::new(),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            keypad: Keypad::new(),
            run_state: RunState::Running,
        }
    }

    pub fn reg(&self, register: Register) -> u8 {
        self.v[register.index()]
    }

    pub fn set_reg(&mut self, register: Register, value: u8) {
        self.v[register.index()] = value;
    }

    /// if cond then pc += 2
    pub fn skip_if(&mut self, cond: bool) {
        if cond {
            self.pc = self.pc.wrapping_add(0x2);
        }
    }

    /// Writes VF; always the last register write of an instruction
    pub fn set_flag(&mut self, flag: bool) {
        self.v[FLAG_REGISTER] = flag as u8;
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
