use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::constants::PROGRAM_START;
use crate::error::{Chip8Error, Fault, Result};
use crate::framebuffer::FrameBuffer;
use crate::instruction::decode;
use crate::operations::execute;
use crate::state::{RunState, State};
use crate::timers::{decay, Timers};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the timer clock
///  - the random source used by `Cxkk`
///  - the fault that stopped the program, if any
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU (and its timers)
/// - inspecting its frame buffer for rendering by some display
/// - whether a tone should be playing
pub struct Chip8 {
    state: State,
    timers: Timers,
    rng: StdRng,
    loaded: bool,
    fault: Option<Fault>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            state: State::new(),
            timers: Timers::new(config.timer_interval),
            rng,
            loaded: false,
            fault: None,
        }
    }

    /// Load a rom; only one rom may be loaded per machine
    ///
    /// # Arguments
    /// * `rom` the program image, at most `MAX_ROM_SIZE` bytes
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if self.loaded {
            return Err(Chip8Error::RomAlreadyLoaded);
        }
        self.state.memory.load_program(rom)?;
        self.state.pc = PROGRAM_START;
        self.loaded = true;
        log::debug!("loaded {} byte rom at {:04X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Returns a snapshot of the FrameBuffer if it changed since the last call
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Set the pressed status of key, handing it to any register waiting on one
    ///
    /// # Arguments
    /// * `key` the key that was pressed, 0x0..=0xF
    pub fn key_press(&mut self, key: u8) -> Result<()> {
        self.state.keypad.press(key)?;
        if let RunState::AwaitingKey(register) = self.state.run_state {
            log::debug!("key {:X} written to {}", key, register);
            self.state.set_reg(register, key);
            self.state.run_state = RunState::Running;
        }
        Ok(())
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the key that was released, 0x0..=0xF
    pub fn key_release(&mut self, key: u8) -> Result<()> {
        self.state.keypad.release(key)
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.state.run_state != RunState::Running
    }

    /// The fault that stopped the program, if it has stopped
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Advances the machine by a single step using the current time
    pub fn step(&mut self) -> std::result::Result<(), Fault> {
        self.step_at(Instant::now())
    }

    /// Advances the machine by a single step
    /// - counts the timers down if a timer interval has passed by `now`
    /// - does nothing else while awaiting a keypress
    /// - gets and executes the next opcode
    ///
    /// After a fault nothing advances and the same fault is returned again.
    pub fn step_at(&mut self, now: Instant) -> std::result::Result<(), Fault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        let pc = self.state.pc;
        if !self.loaded {
            return Err(Fault {
                pc,
                word: None,
                error: Chip8Error::NoRomLoaded,
            });
        }

        self.advance_timers(now);
        if let RunState::AwaitingKey(_) = self.state.run_state {
            return Ok(());
        }

        let op = match self.state.memory.read_word(pc) {
            Ok(op) => op,
            Err(error) => {
                return Err(self.halt(Fault {
                    pc,
                    word: None,
                    error,
                }))
            }
        };

        self.state.pc = pc.wrapping_add(0x2);
        let state = &mut self.state;
        let rng = &mut self.rng;
        let result = decode(op).and_then(|instruction| {
            log::trace!(
                "{:04X} {} v{:02X?} i{:04X} pc{:04X}",
                op,
                instruction,
                state.v,
                state.i,
                pc
            );
            execute(instruction, state, rng)
        });
        if let Err(error) = result {
            // leave the pc on the offending instruction
            self.state.pc = pc;
            return Err(self.halt(Fault {
                pc,
                word: Some(op),
                error,
            }));
        }
        Ok(())
    }

    fn halt(&mut self, fault: Fault) -> Fault {
        self.fault = Some(fault);
        fault
    }

    /// Counts both timers down once if a full interval has passed
    fn advance_timers(&mut self, now: Instant) {
        if self.timers.tick(now) {
            decay(&mut self.state.delay_timer);
            decay(&mut self.state.sound_timer);
        }
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_ROM_SIZE;
    use crate::state::Register;

    fn loaded(rom: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_config(Config::default().with_seed(0));
        chip8.load_rom(rom).unwrap();
        chip8
    }

    #[test]
    fn test_load_sets_pc() {
        let chip8 = loaded(&[0x00, 0xE0]);
        assert_eq!(chip8.state.pc, PROGRAM_START);
        assert_eq!(chip8.state.memory.read_word(0x200), Ok(0x00E0));
    }

    #[test]
    fn test_rejects_second_load() {
        let mut chip8 = loaded(&[0x00, 0xE0]);
        assert_eq!(chip8.load_rom(&[0x12, 0x00]), Err(Chip8Error::RomAlreadyLoaded));
    }

    #[test]
    fn test_rejects_oversized_rom() {
        let mut chip8 = Chip8::new();
        let rom = vec![0; MAX_ROM_SIZE + 1];
        assert_eq!(
            chip8.load_rom(&rom),
            Err(Chip8Error::RomTooLarge {
                size: MAX_ROM_SIZE + 1,
                max: MAX_ROM_SIZE,
            })
        );
        // a rom that fits can still be loaded
        assert!(chip8.load_rom(&[0x00, 0xE0]).is_ok());
    }

    #[test]
    fn test_step_without_rom() {
        let mut chip8 = Chip8::new();
        let fault = chip8.step().unwrap_err();
        assert_eq!(fault.error, Chip8Error::NoRomLoaded);
        assert_eq!(chip8.fault(), None);
    }

    #[test]
    fn test_cycles_while_no_register_needs_key() {
        let mut chip8 = loaded(&[0x00, 0xE0]);
        chip8.step().unwrap();
        assert_eq!(chip8.state.pc, PROGRAM_START + 0x2);
    }

    #[test]
    fn test_captures_key_presses() {
        let mut chip8 = loaded(&[0x00, 0xE0]);
        chip8.state.run_state = RunState::AwaitingKey(Register::from_nibble(0x1));
        chip8.key_press(0xE).unwrap();
        assert_eq!(chip8.state.run_state, RunState::Running);
        assert_eq!(chip8.state.v[0x1], 0xE);
        assert!(chip8.state.keypad.is_pressed(0xE));
    }

    #[test]
    fn test_key_press_while_running_only_latches() {
        let mut chip8 = loaded(&[0x00, 0xE0]);
        chip8.key_press(0x3).unwrap();
        assert_eq!(chip8.state.v, [0; 16]);
        chip8.key_release(0x3).unwrap();
        assert!(!chip8.state.keypad.is_pressed(0x3));
    }

    #[test]
    fn test_rejects_unknown_key() {
        let mut chip8 = loaded(&[0x00, 0xE0]);
        chip8.state.run_state = RunState::AwaitingKey(Register::from_nibble(0x1));
        assert_eq!(chip8.key_press(0x10), Err(Chip8Error::InvalidKey(0x10)));
        assert!(chip8.is_awaiting_key());
    }

    #[test]
    fn test_doesnt_cycle_while_register_needs_key() {
        let mut chip8 = loaded(&[0x00, 0xE0]);
        chip8.state.run_state = RunState::AwaitingKey(Register::from_nibble(0x1));
        chip8.step().unwrap();
        assert_eq!(chip8.state.pc, PROGRAM_START);
    }

    #[test]
    fn test_clear_screen_step() {
        let mut chip8 = loaded(&[0x00, 0xE0]);
        chip8.state.frame_buffer.set(7, 3, true);
        chip8.step().unwrap();
        assert_eq!(chip8.frame_buffer().lit(), 0);
    }

    #[test]
    fn test_take_frame_only_after_drawing() {
        let mut chip8 = loaded(&[0x00, 0xE0, 0x60, 0x01]);
        assert!(chip8.take_frame().is_none());
        chip8.step().unwrap();
        assert!(chip8.take_frame().is_some());
        assert!(chip8.take_frame().is_none());
        chip8.step().unwrap();
        assert!(chip8.take_frame().is_none());
    }

    #[test]
    fn test_fault_latches() {
        // 0x5121 has a non-zero low nibble
        let mut chip8 = loaded(&[0x51, 0x21, 0x60, 0x01]);
        let fault = chip8.step().unwrap_err();
        assert_eq!(
            fault,
            Fault {
                pc: 0x200,
                word: Some(0x5121),
                error: Chip8Error::InvalidVariant(0x5121),
            }
        );
        assert_eq!(chip8.step(), Err(fault));
        assert_eq!(chip8.state.pc, 0x200);
        assert_eq!(chip8.fault(), Some(fault));
    }

    #[test]
    fn test_fetch_past_memory_faults() {
        // jump to the last byte, where a whole word can't be read
        let mut chip8 = loaded(&[0x1F, 0xFF]);
        chip8.step().unwrap();
        let fault = chip8.step().unwrap_err();
        assert_eq!(fault.pc, 0xFFF);
        assert_eq!(fault.word, None);
        assert_eq!(fault.error, Chip8Error::MemoryOutOfRange { address: 0x1000 });
    }

    #[test]
    fn test_sound_active() {
        // V0 = 2; ST = V0
        let mut chip8 = loaded(&[0x60, 0x02, 0xF0, 0x18]);
        assert!(!chip8.sound_active());
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert!(chip8.sound_active());
    }

    #[test]
    fn test_fault_display() {
        let fault = Fault {
            pc: 0x204,
            word: Some(0x0123),
            error: Chip8Error::UnimplementedInstruction(0x0123),
        };
        assert_eq!(
            fault.to_string(),
            "unimplemented instruction 0x0123 (op 0123 at pc 0204)"
        );
    }

    #[test]
    fn test_oversized_rom_display() {
        let error = Chip8Error::RomTooLarge {
            size: MAX_ROM_SIZE + 1,
            max: MAX_ROM_SIZE,
        };
        assert_eq!(
            error.to_string(),
            "ROM is 3585 bytes but at most 3584 fit in memory"
        );
    }
}
