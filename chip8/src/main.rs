use std::path::PathBuf;

use clap::Parser;

use emu8_core::constants::MAX_SAVED_STATES;
use emu8_core::CLOCK_SPEED;

use crate::run::{FaultPolicy, Settings};

mod keymap;
mod run;

/// A Chip-8 interpreter.
///
/// Set RUST_LOG=trace to see every instruction as it runs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(short, long, default_value_t = CLOCK_SPEED)]
    cycles_per_second: u32,

    /// Size of each Chip-8 pixel on screen
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// What to do when an instruction can't be executed
    #[arg(long, value_enum, default_value_t = FaultPolicy::Halt)]
    on_fault: FaultPolicy,

    /// Seed for the random number instruction, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of past cycles kept for rewinding; 0 disables rewinding
    #[arg(long, default_value_t = MAX_SAVED_STATES)]
    rewind_depth: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    run::run(Settings {
        rom: args.rom,
        cycles_per_second: args.cycles_per_second,
        scale: args.scale,
        on_fault: args.on_fault,
        seed: args.seed,
        rewind_depth: args.rewind_depth,
    })
}
