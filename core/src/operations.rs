use rand::RngCore;

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_HEIGHT, FONT_START, STACK_SIZE,
};
use crate::error::Chip8Error;
use crate::keypad::Keypad;
use crate::state::State;

// Every operation runs after the program counter has been moved past its own opcode,
// so "skip" means one more step of 2 and a saved return address is the next instruction.

/// Address of the instruction currently executing.
fn current_address(state: &State) -> u16 {
    state.pc.wrapping_sub(2)
}

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer.clear();
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<(), Chip8Error> {
    if state.sp == 0 {
        return Err(Chip8Error::StackUnderflow {
            pc: current_address(state),
        });
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp as usize];
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<(), Chip8Error> {
    if state.sp as usize >= STACK_SIZE {
        return Err(Chip8Error::StackOverflow {
            pc: current_address(state),
        });
    }
    state.stack[state.sp as usize] = state.pc;
    state.sp += 1;
    state.pc = addr;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) {
    if state.v[x as usize] == kk {
        state.skip();
    }
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) {
    if state.v[x as usize] != kk {
        state.skip();
    }
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) {
    if state.v[x as usize] == state.v[y as usize] {
        state.skip();
    }
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = kk;
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] = state.v[y as usize];
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] |= state.v[y as usize];
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] &= state.v[y as usize];
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] ^= state.v[y as usize];
}

/// Vx += Vy; VF = overflow
///
/// The flag is written before the result, so `8Fy4` leaves the sum in VF.
pub fn addr(state: &mut State, x: u8, y: u8) {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[0xF] = over as u8;
    state.v[x as usize] = res;
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, x: u8, y: u8) {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[0xF] = (vx > vy) as u8;
    state.v[x as usize] = vx.wrapping_sub(vy);
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    state.v[0xF] = vx & 0x1;
    state.v[x as usize] = vx >> 1;
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &mut State, x: u8, y: u8) {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[0xF] = (vy > vx) as u8;
    state.v[x as usize] = vy.wrapping_sub(vx);
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    state.v[0xF] = vx >> 7;
    state.v[x as usize] = vx << 1;
}

/// if Vx != Vy then pc +=2
pub fn skrne(state: &mut State, x: u8, y: u8) {
    if state.v[x as usize] != state.v[y as usize] {
        state.skip();
    }
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) {
    state.i = addr;
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) {
    state.pc = u16::from(state.v[0x0]) + addr;
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, x: u8, kk: u8, rng: &mut dyn RngCore) {
    let rand_byte = rng.next_u32() as u8;
    state.v[x as usize] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels are erased
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) {
    let origin_x = state.v[x as usize] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[y as usize] as usize % DISPLAY_HEIGHT;
    let mut collision = false;

    for row in 0..u16::from(n) {
        let sprite_byte = state.read(state.i.wrapping_add(row));
        let py = (origin_y + row as usize) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if sprite_byte & (0x80 >> bit) == 0 {
                continue;
            }
            let px = (origin_x + bit) % DISPLAY_WIDTH;
            collision |= state.frame_buffer.toggle(px, py);
        }
    }

    state.v[0xF] = collision as u8;
    state.draw_flag = true;
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: u8, keypad: &Keypad) {
    if keypad.is_pressed(state.v[x as usize]) {
        state.skip();
    }
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: u8, keypad: &Keypad) {
    if !keypad.is_pressed(state.v[x as usize]) {
        state.skip();
    }
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) {
    state.v[x as usize] = state.delay_timer;
}

/// await keypress for Vx
/// Takes the lowest pressed key right away if there is one, otherwise the VM starts
/// waiting on this instruction until a key goes down.
pub fn keyd(state: &mut State, x: u8, keypad: &Keypad) {
    match keypad.first_pressed() {
        Some(key) => {
            state.v[x as usize] = key;
            state.awaiting_key = None;
        }
        None => state.awaiting_key = Some(x),
    }
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) {
    state.delay_timer = state.v[x as usize];
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) {
    state.sound_timer = state.v[x as usize];
}

/// I += Vx
/// Wraps within memory; VF is untouched.
pub fn addi(state: &mut State, x: u8) {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize])) & ADDRESS_MASK;
}

/// I = FONT_START + (Vx & 0xF) * 5
/// Set I to the memory address of the sprite for the hex digit in Vx
pub fn ldspr(state: &mut State, x: u8) {
    let digit = u16::from(state.v[x as usize] & 0x0F);
    state.i = FONT_START + digit * FONT_GLYPH_HEIGHT;
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, &digit) in digits.iter().enumerate() {
        state.write(state.i.wrapping_add(offset as u16), digit);
    }
}

/// mem[I..=I+x] = V0..=Vx
/// I is left unchanged.
pub fn stor(state: &mut State, x: u8) {
    for register in 0..=x {
        let value = state.v[register as usize];
        state.write(state.i.wrapping_add(u16::from(register)), value);
    }
}

/// V0..=Vx = mem[I..=I+x]
/// I is left unchanged.
pub fn read(state: &mut State, x: u8) {
    for register in 0..=x {
        state.v[register as usize] = state.read(state.i.wrapping_add(u16::from(register)));
    }
}
