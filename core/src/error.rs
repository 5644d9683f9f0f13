use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
///
/// Load-time errors leave the VM idle. Cycle-time errors leave the VM exactly as it was
/// before the failing `step`, so the caller decides whether to halt or skip.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("program is {size} bytes but at most {max} fit in memory")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("cannot fetch an instruction at {pc:#06X}: outside of memory")]
    OutOfBoundsFetch { pc: u16 },

    #[error("stack overflow calling a subroutine from {pc:#06X}")]
    StackOverflow { pc: u16 },

    #[error("stack underflow returning from {pc:#06X}")]
    StackUnderflow { pc: u16 },

    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),

    #[error("unable to read program: {0}")]
    Io(#[from] std::io::Error),
}
