use log::debug;

use crate::constants::{FONT_START, GLYPH_HEIGHT};
use crate::error::Fault;
use crate::machine::Machine;
use crate::opcode::Opcode;
use crate::state::RunState;

/// Every handler runs after the fetch has already moved `pc` past the current word,
/// so jumps overwrite it and skips add another 2.
pub type Handler = fn(op: u16, machine: &mut Machine) -> Result<(), Fault>;

fn skip_if(machine: &mut Machine, condition: bool) {
    if condition {
        machine.state.pc += 0x2;
    }
}

fn vx(op: u16, machine: &Machine) -> u8 {
    machine.state.v[op.x() as usize]
}

fn vy(op: u16, machine: &Machine) -> u8 {
    machine.state.v[op.y() as usize]
}

/// clear the display
pub fn cls(_op: u16, machine: &mut Machine) -> Result<(), Fault> {
    machine.frame_buffer.clear();
    machine.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn ret(_op: u16, machine: &mut Machine) -> Result<(), Fault> {
    machine.state.pc = machine.state.pop_return()?;
    Ok(())
}

/// PC = nnn
pub fn jp(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    machine.state.pc = op.nnn();
    Ok(())
}

/// STACK.push(PC); PC = nnn
pub fn call(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    machine.state.push_return()?;
    machine.state.pc = op.nnn();
    Ok(())
}

/// if Vx == kk then skip
pub fn se_byte(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let equal = vx(op, machine) == op.kk();
    skip_if(machine, equal);
    Ok(())
}

/// if Vx != kk then skip
pub fn sne_byte(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let differ = vx(op, machine) != op.kk();
    skip_if(machine, differ);
    Ok(())
}

/// if Vx == Vy then skip
pub fn se_reg(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let equal = vx(op, machine) == vy(op, machine);
    skip_if(machine, equal);
    Ok(())
}

/// if Vx != Vy then skip
pub fn sne_reg(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let differ = vx(op, machine) != vy(op, machine);
    skip_if(machine, differ);
    Ok(())
}

/// Vx = kk
pub fn ld_byte(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    machine.state.v[op.x() as usize] = op.kk();
    Ok(())
}

/// Vx += kk
/// Wraps without touching VF
pub fn add_byte(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let v = &mut machine.state.v[op.x() as usize];
    *v = v.wrapping_add(op.kk());
    Ok(())
}

/// Vx = Vy
pub fn ld_reg(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let y = vy(op, machine);
    machine.state.v[op.x() as usize] = y;
    Ok(())
}

/// Vx |= Vy
pub fn or(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let y = vy(op, machine);
    machine.state.v[op.x() as usize] |= y;
    Ok(())
}

/// Vx &= Vy
pub fn and(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let y = vy(op, machine);
    machine.state.v[op.x() as usize] &= y;
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let y = vy(op, machine);
    machine.state.v[op.x() as usize] ^= y;
    Ok(())
}

/// Vx += Vy; VF = carry
pub fn add_reg(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let (res, carry) = vx(op, machine).overflowing_add(vy(op, machine));
    let v = &mut machine.state.v;
    v[0xF] = carry as u8;
    v[op.x() as usize] = res;
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let (x, y) = (vx(op, machine), vy(op, machine));
    let v = &mut machine.state.v;
    v[0xF] = (x > y) as u8;
    v[op.x() as usize] = x.wrapping_sub(y);
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let (x, y) = (vx(op, machine), vy(op, machine));
    let v = &mut machine.state.v;
    v[0xF] = (y > x) as u8;
    v[op.x() as usize] = y.wrapping_sub(x);
    Ok(())
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let x = vx(op, machine);
    let v = &mut machine.state.v;
    v[0xF] = x & 0x1;
    v[op.x() as usize] = x >> 1;
    Ok(())
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let x = vx(op, machine);
    let v = &mut machine.state.v;
    v[0xF] = (x >> 7) & 0x1;
    v[op.x() as usize] = x << 1;
    Ok(())
}

/// I = nnn
pub fn ld_i(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    machine.state.i = op.nnn();
    Ok(())
}

/// PC = V0 + nnn
pub fn jp_v0(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    machine.state.pc = u16::from(machine.state.v[0x0]) + op.nnn();
    Ok(())
}

/// Vx = random_byte & kk
pub fn rnd(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let rand_byte: u8 = rand::random();
    machine.state.v[op.x() as usize] = rand_byte & op.kk();
    Ok(())
}

/// draw_sprite(x=Vx, y=Vy, rows=mem[I..I+n]); VF = collision
pub fn drw(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let (x, y) = (vx(op, machine), vy(op, machine));
    let sprite = machine
        .memory
        .slice(machine.state.i as usize, op.n() as usize)?;
    let collision = machine.frame_buffer.draw(x, y, sprite);
    machine.state.v[0xF] = collision as u8;
    machine.draw_flag = true;
    Ok(())
}

/// if keypad[Vx] pressed then skip
pub fn skp(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let pressed = machine.keypad.is_pressed(vx(op, machine));
    skip_if(machine, pressed);
    Ok(())
}

/// if keypad[Vx] not pressed then skip
pub fn sknp(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let pressed = machine.keypad.is_pressed(vx(op, machine));
    skip_if(machine, !pressed);
    Ok(())
}

/// Vx = DT
pub fn ld_vx_dt(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    machine.state.v[op.x() as usize] = machine.state.delay_timer;
    Ok(())
}

/// Vx = next key press
/// Parks the processor; `Machine::step` fills in Vx once a key is down.
pub fn ld_vx_k(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    debug!("awaiting key for V{:X}", op.x());
    machine.state.run_state = RunState::AwaitingKey { register: op.x() };
    Ok(())
}

/// DT = Vx
pub fn ld_dt(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let x = vx(op, machine);
    machine.state.delay_timer = x;
    Ok(())
}

/// ST = Vx
pub fn ld_st(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let x = vx(op, machine);
    machine.state.sound_timer = x;
    Ok(())
}

/// I += Vx
/// I may leave the address space here; the next access through it faults.
pub fn add_i(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let x = u16::from(vx(op, machine));
    machine.state.i = machine.state.i.saturating_add(x);
    Ok(())
}

/// I = address of the font glyph for Vx
pub fn ld_f(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let digit = u16::from(vx(op, machine));
    machine.state.i = FONT_START + GLYPH_HEIGHT * digit;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
pub fn ld_b(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let x = vx(op, machine);
    let bcd = [x / 100, x / 10 % 10, x % 10];
    machine
        .memory
        .slice_mut(machine.state.i as usize, bcd.len())?
        .copy_from_slice(&bcd);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn ld_store(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let len = op.x() as usize + 1;
    machine
        .memory
        .slice_mut(machine.state.i as usize, len)?
        .copy_from_slice(&machine.state.v[..len]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn ld_load(op: u16, machine: &mut Machine) -> Result<(), Fault> {
    let len = op.x() as usize + 1;
    let bytes = machine.memory.slice(machine.state.i as usize, len)?;
    machine.state.v[..len].copy_from_slice(bytes);
    Ok(())
}
