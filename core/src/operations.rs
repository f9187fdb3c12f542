use log::warn;
use rand::Rng;

use crate::constants::{GLYPH_SIZE, KEY_COUNT, OPCODE_SIZE};
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::keypad::KeyState;
use crate::registers::Registers;
use crate::state::State;

/// What the host should know about an executed instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// The display changed
    Redraw,
    /// `Fx0A` found no key pressed and rewound the PC to run again next step
    WaitingForKey,
    /// The opcode wasn't recognized and was skipped over
    Unknown(u16),
}

/// Executes a single decoded instruction against `state`.
///
/// The PC must already point past the instruction; jumps overwrite it and skips add to it.
pub fn execute<R: Rng + ?Sized>(
    instruction: Instruction,
    state: &mut State,
    keys: &dyn KeyState,
    rng: &mut R,
) -> Result<StepOutcome, Fault> {
    use Instruction::*;

    let regs = &mut state.registers;
    match instruction {
        Clr => {
            state.display.clear();
            state.draw_flag = true;
            return Ok(StepOutcome::Redraw);
        }
        Rts => regs.pc = state.stack.pop()?,
        Jump { addr } => regs.pc = addr,
        Call { addr } => {
            state.stack.push(regs.pc)?;
            regs.pc = addr;
        }
        Ske { x, nn } => skip_if(regs.get(x) == nn, regs),
        Skne { x, nn } => skip_if(regs.get(x) != nn, regs),
        Skre { x, y } => skip_if(regs.get(x) == regs.get(y), regs),
        Load { x, nn } => regs.set(x, nn),
        Add { x, nn } => regs.set(x, regs.get(x).wrapping_add(nn)),
        Mv { x, y } => regs.set(x, regs.get(y)),
        Or { x, y } => regs.set(x, regs.get(x) | regs.get(y)),
        And { x, y } => regs.set(x, regs.get(x) & regs.get(y)),
        Xor { x, y } => regs.set(x, regs.get(x) ^ regs.get(y)),
        Addr { x, y } => {
            let (sum, carry) = regs.get(x).overflowing_add(regs.get(y));
            regs.set_flag(carry);
            regs.set(x, sum);
        }
        Sub { x, y } => {
            let (difference, borrow) = regs.get(x).overflowing_sub(regs.get(y));
            regs.set_flag(!borrow);
            regs.set(x, difference);
        }
        Shr { x, y } => {
            let vy = regs.get(y);
            regs.set_flag(vy & 0x1 == 1);
            regs.set(x, vy >> 1);
        }
        Subn { x, y } => {
            let (difference, borrow) = regs.get(y).overflowing_sub(regs.get(x));
            regs.set_flag(!borrow);
            regs.set(x, difference);
        }
        Shl { x, y } => {
            let vy = regs.get(y);
            regs.set_flag(vy >> 7 == 1);
            regs.set(x, vy << 1);
        }
        Skrne { x, y } => skip_if(regs.get(x) != regs.get(y), regs),
        LoadI { addr } => regs.i = addr,
        JumpI { addr } => regs.pc = addr + u16::from(regs.get(0x0)),
        Rand { x, nn } => regs.set(x, rng.gen::<u8>() & nn),
        Draw { x, y, n } => return draw(state, x, y, n),
        // A key that doesn't exist is neither pressed nor released
        Skpr { x } => skip_if(key_held(keys, regs.get(x)) == Some(true), regs),
        Skup { x } => skip_if(key_held(keys, regs.get(x)) == Some(false), regs),
        MoveD { x } => regs.set(x, regs.delay_timer),
        KeyD { x } => match keys.first_pressed() {
            Some(key) => regs.set(x, key),
            None => {
                regs.pc = regs.pc.wrapping_sub(OPCODE_SIZE);
                return Ok(StepOutcome::WaitingForKey);
            }
        },
        LoadD { x } => regs.delay_timer = regs.get(x),
        LoadS { x } => regs.sound_timer = regs.get(x),
        AddI { x } => regs.i = regs.i.wrapping_add(u16::from(regs.get(x))),
        LdSpr { x } => regs.i = u16::from(regs.get(x)) * GLYPH_SIZE as u16,
        Bcd { x } => bcd(state, x)?,
        Stor { x } => stor(state, x)?,
        Read { x } => read(state, x)?,
        Unknown(op) => {
            warn!(
                "skipping unknown opcode {:#06X} at {:#05X}",
                op,
                state.registers.pc.wrapping_sub(OPCODE_SIZE)
            );
            return Ok(StepOutcome::Unknown(op));
        }
    }
    Ok(StepOutcome::Continue)
}

/// Whether `key` is held, or `None` if there is no such key on the keypad
fn key_held(keys: &dyn KeyState, key: u8) -> Option<bool> {
    if usize::from(key) < KEY_COUNT {
        Some(keys.is_pressed(key))
    } else {
        None
    }
}

/// Skips over the next instruction when `condition` holds
fn skip_if(condition: bool, regs: &mut Registers) {
    if condition {
        regs.pc = regs.pc.wrapping_add(OPCODE_SIZE);
    }
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n byte sprite at mem[I..I+n] onto the display with its corner at (Vx, Vy).
/// Sets VF if any pixels were erased
fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<StepOutcome, Fault> {
    let col = state.registers.get(x) as usize;
    let row = state.registers.get(y) as usize;
    let sprite = state.memory.slice(state.registers.i as usize, n as usize)?;
    let collided = state.display.blit(row, col, sprite);
    state.registers.set_flag(collided);
    state.draw_flag = true;
    Ok(StepOutcome::Redraw)
}

/// mem[I..I+3] = bcd(Vx)
/// Store the hundreds, tens and ones digits of Vx in memory starting at address I
fn bcd(state: &mut State, x: u8) -> Result<(), Fault> {
    let vx = state.registers.get(x);
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state
        .memory
        .slice_mut(state.registers.i as usize, digits.len())?
        .copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
fn stor(state: &mut State, x: u8) -> Result<(), Fault> {
    let len = usize::from(x) + 1;
    let regs = &mut state.registers;
    state
        .memory
        .slice_mut(regs.i as usize, len)?
        .copy_from_slice(&regs.v[..len]);
    regs.i = regs.i.wrapping_add(len as u16);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
fn read(state: &mut State, x: u8) -> Result<(), Fault> {
    let len = usize::from(x) + 1;
    let regs = &mut state.registers;
    regs.v[..len].copy_from_slice(state.memory.slice(regs.i as usize, len)?);
    regs.i = regs.i.wrapping_add(len as u16);
    Ok(())
}
