use rand::Rng;

use crate::constants::{FONT_START, GLYPH_SIZE};
use crate::error::Result;
use crate::instruction::{AluOp, Instruction};
use crate::state::{Register, RunState, State};

/// Runs one decoded instruction against the state.
///
/// The pc has already been moved past the instruction, so anything that
/// redirects control flow simply overwrites it.
pub fn execute<R: Rng>(instruction: Instruction, state: &mut State, rng: &mut R) -> Result<()> {
    use Instruction::*;

    match instruction {
        Clr => clr(state),
        Rts => return rts(state),
        Jump { addr } => state.pc = addr,
        Call { addr } => return call(state, addr),
        Ske { x, kk } => state.skip_if(state.reg(x) == kk),
        Skne { x, kk } => state.skip_if(state.reg(x) != kk),
        Skre { x, y } => state.skip_if(state.reg(x) == state.reg(y)),
        Load { x, kk } => state.set_reg(x, kk),
        Add { x, kk } => state.set_reg(x, state.reg(x).wrapping_add(kk)),
        Alu { op, x, y } => alu(state, op, x, y),
        Skrne { x, y } => state.skip_if(state.reg(x) != state.reg(y)),
        Loadi { addr } => state.i = addr,
        Jumpi { addr } => state.pc = addr + u16::from(state.reg(Register::V0)),
        Rand { x, kk } => state.set_reg(x, rng.gen::<u8>() & kk),
        Draw { x, y, n } => return draw(state, x, y, n),
        Skpr { x } => state.skip_if(state.keypad.is_pressed(state.reg(x))),
        Skup { x } => state.skip_if(!state.keypad.is_pressed(state.reg(x))),
        Moved { x } => state.set_reg(x, state.delay_timer),
        Keyd { x } => {
            log::debug!("awaiting key press for {}", x);
            state.run_state = RunState::AwaitingKey(x);
        }
        Loadd { x } => state.delay_timer = state.reg(x),
        Loads { x } => state.sound_timer = state.reg(x),
        Addi { x } => state.i = state.i.wrapping_add(u16::from(state.reg(x))),
        Ldspr { x } => state.i = FONT_START + u16::from(state.reg(x)) * GLYPH_SIZE,
        Bcd { x } => return bcd(state, x),
        Stor { x } => return stor(state, x),
        Read { x } => return read(state, x),
    }
    Ok(())
}

/// clear
fn clr(state: &mut State) {
    state.frame_buffer.clear();
    state.draw_flag = true;
}

/// PC = STACK.pop()
fn rts(state: &mut State) -> Result<()> {
    state.pc = state.stack.pop()?;
    Ok(())
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, addr: u16) -> Result<()> {
    state.stack.push(state.pc)?;
    state.pc = addr;
    Ok(())
}

/// Vx = Vx <op> Vy, and maybe VF = flag.
///
/// Both operands are read before anything is written and VF goes last, so
/// when x is VF the flag is what remains.
fn alu(state: &mut State, op: AluOp, x: Register, y: Register) {
    let (vx, vy) = (state.reg(x), state.reg(y));
    let (result, flag) = match op {
        AluOp::Move => (vy, None),
        AluOp::Or => (vx | vy, None),
        AluOp::And => (vx & vy, None),
        AluOp::Xor => (vx ^ vy, None),
        AluOp::Add => {
            let (res, over) = vx.overflowing_add(vy);
            (res, Some(over))
        }
        AluOp::Sub => (vx.wrapping_sub(vy), Some(vx >= vy)),
        AluOp::Shr => (vx >> 1, Some(vx & 0x1 == 0x1)),
        AluOp::Subn => (vy.wrapping_sub(vx), Some(vy >= vx)),
        AluOp::Shl => (vx << 1, Some(vx & 0x80 == 0x80)),
    };
    state.set_reg(x, result);
    if let Some(flag) = flag {
        state.set_flag(flag);
    }
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position Vx, Vy on the FrameBuffer.
/// Pixels falling off the screen are clipped.
/// Sets VF if any pixels were erased
fn draw(state: &mut State, x: Register, y: Register, n: u8) -> Result<()> {
    let (col, row) = (state.reg(x) as usize, state.reg(y) as usize);

    // VF is only written once the whole sprite is readable
    let sprite = state.memory.read_slice(state.i, n as usize)?;
    let collided = state.frame_buffer.draw_sprite(col, row, sprite);
    state.draw_flag = true;
    state.set_flag(collided);
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: Register) -> Result<()> {
    let value = state.reg(x);
    let digits = [value / 100, value / 10 % 10, value % 10];
    state.memory.write_slice(state.i, &digits)
}

/// mem[I..=I+x] = V0..=Vx
/// I itself is left unchanged
fn stor(state: &mut State, x: Register) -> Result<()> {
    state.memory.write_slice(state.i, &state.v[..=x.index()])
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: Register) -> Result<()> {
    let bytes = state.memory.read_slice(state.i, x.index() + 1)?;
    state.v[..=x.index()].copy_from_slice(bytes);
    Ok(())
}
