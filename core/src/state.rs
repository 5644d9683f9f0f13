use crate::constants::{
    ADDRESS_MASK, FONT_START, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET, STACK_SIZE,
};
use crate::frame::FrameBuffer;

/// A snapshot of the Chip-8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of occupied stack slots, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented at 60Hz by whoever drives the VM
///
/// ## Memory
/// - 16 slot stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x200 is reserved, the sprite sheet lives at 0x050
///     - programs are loaded at 0x200
/// - 64x32 frame buffer
///
/// ## Input
/// - `awaiting_key` is set while `Fx0A` is waiting for a key to be pressed
#[derive(Copy, Clone, Debug)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub awaiting_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            awaiting_key: None,
        }
    }

    /// Reads a byte of memory; the address wraps at the end of memory.
    pub fn read(&self, address: u16) -> u8 {
        self.memory[(address & ADDRESS_MASK) as usize]
    }

    /// Writes a byte of memory; the address wraps at the end of memory.
    pub fn write(&mut self, address: u16, value: u8) {
        self.memory[(address & ADDRESS_MASK) as usize] = value;
    }

    /// Advances the program counter past the next instruction.
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
