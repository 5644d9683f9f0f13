pub use chip8::{Chip8, Cycle};
pub use clock::{Clock, Ticks};
pub use constants::CLOCK_SPEED;
pub use error::Chip8Error;
pub use frame::FrameBuffer;
pub use instruction::Instruction;
pub use keypad::Keypad;
pub use opcode::Opcode;
pub use rom::Rom;

mod chip8;
mod clock;
pub mod constants;
mod error;
mod frame;
mod instruction;
mod keypad;
mod opcode;
mod operations;
mod rom;
pub mod state;
