pub use chip8::Chip8;
pub use config::Config;
pub use constants::{CLOCK_SPEED, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use error::{Chip8Error, Fault};
pub use framebuffer::FrameBuffer;
pub use instruction::{decode, AluOp, Instruction};
pub use keypad::Keypad;
pub use memory::Memory;
pub use stack::CallStack;
pub use state::{Register, RunState, State};

mod chip8;
mod config;
pub mod constants;
mod error;
mod framebuffer;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod stack;
pub mod state;
mod timers;
