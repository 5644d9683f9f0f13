use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use log::{debug, error, info, warn};
use sdl2::event::Event;

use crate::keymap::{keymap, Control};
use emu8_core::{Chip8, Clock, Rom};
use emu8_display::Display;

const TITLE: &str = "Emu-8";

/// How many times faster the VM runs while fast-forwarding.
const FAST_FORWARD: u32 = 4;

/// How long the loop sleeps between polls for input.
const IDLE: Duration = Duration::from_millis(1);

/// What to do when a cycle fails.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FaultPolicy {
    /// Stop executing; the window stays open on the last frame.
    Halt,
    /// Step over the faulting instruction and carry on.
    Skip,
}

pub struct Settings {
    pub rom: PathBuf,
    pub cycles_per_second: u32,
    pub scale: u32,
    pub on_fault: FaultPolicy,
    pub seed: Option<u64>,
    pub rewind_depth: usize,
}

pub fn run(settings: Settings) -> anyhow::Result<()> {
    let rom = Rom::open(&settings.rom)
        .with_context(|| format!("unable to load ROM {}", settings.rom.display()))?;
    info!("loaded {} byte ROM {}", rom.len(), settings.rom.display());

    let chip8 = match settings.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };
    let mut chip8 = chip8.with_rewind_depth(settings.rewind_depth);
    chip8.load_rom(rom)?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e)).context("unable to start SDL")?;
    let mut display = Display::new(&sdl, TITLE, settings.scale)?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    let mut clock = Clock::new(settings.cycles_per_second);
    let mut last_update = Instant::now();

    // Whether or not the default clock speed should be respected
    let mut fast_forward = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind = false;
    let mut halted = false;
    let mut beeping = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match keymap(key) {
                    Some(Control::Key(k)) => chip8.key_press(k),
                    Some(Control::FastForward) => fast_forward = true,
                    Some(Control::Rewind) => rewind = true,
                    Some(Control::Quit) => break 'event,
                    None => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match keymap(key) {
                    Some(Control::Key(k)) => chip8.key_release(k),
                    Some(Control::FastForward) => fast_forward = false,
                    Some(Control::Rewind) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Work out how much is due since the last pass
        let now = Instant::now();
        let mut ticks = clock.advance(now - last_update);
        last_update = now;
        if fast_forward {
            ticks.cycles *= FAST_FORWARD;
            ticks.timer_ticks *= FAST_FORWARD;
        }

        // Update state
        if rewind {
            let rewound = (0..ticks.cycles).take_while(|_| chip8.rewind()).count();
            if rewound > 0 {
                debug!("rewound {} cycles to {:#05X}", rewound, chip8.state().pc);
                halted = false;
            }
        } else {
            if !halted {
                for _ in 0..ticks.cycles {
                    if let Err(e) = chip8.step() {
                        match settings.on_fault {
                            FaultPolicy::Halt => {
                                error!("halting: {}", e);
                                halted = true;
                                break;
                            }
                            FaultPolicy::Skip => {
                                warn!("skipping instruction: {}", e);
                                chip8.skip_instruction();
                            }
                        }
                    }
                }
            }
            for _ in 0..ticks.timer_ticks {
                chip8.tick_timers();
            }
        }

        if chip8.sound_active() != beeping {
            beeping = chip8.sound_active();
            let title = if beeping {
                format!("{} (beep)", TITLE)
            } else {
                TITLE.to_string()
            };
            display.set_title(&title)?;
        }

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            display.render(frame)?;
        }

        std::thread::sleep(IDLE);
    }

    info!("quitting");
    Ok(())
}
