/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Every address the VM touches is masked into `0x000..=0xFFF`.
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// ROMs are loaded into memory starting here; the PC starts here on reset.
pub const PROGRAM_START: u16 = 0x200;

/// Largest ROM that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Where the hexadecimal font sprites live.
pub const FONT_START: u16 = 0x050;

/// Every font glyph is 5 rows tall.
pub const FONT_GLYPH_HEIGHT: u16 = 5;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Delay and sound timers count down at this rate regardless of how fast instructions run.
pub const TIMER_FREQUENCY: u32 = 60;

/// Default number of instructions executed per second.
pub const CLOCK_SPEED: u32 = 700;

/// Default number of past cycles kept around for rewinding.
pub const MAX_SAVED_STATES: usize = 1024;

/// # Sprite sheet
/// Sprites for the hexadecimal digits 0..F, each 8 pixels wide and 5 tall.
///
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
