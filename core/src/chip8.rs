use std::collections::VecDeque;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{
    KEY_COUNT, MAX_PROGRAM_SIZE, MAX_SAVED_STATES, MEMORY_SIZE, PROGRAM_START,
};
use crate::error::Chip8Error;
use crate::frame::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::rom::Rom;
use crate::state::State;

/// What a single call to `Chip8::step` did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cycle {
    /// The instruction at `address` ran.
    Executed {
        address: u16,
        instruction: Instruction,
    },
    /// `Fx0A` is still waiting for a key; nothing changed.
    AwaitingKey { x: u8 },
    /// A key went down while `Fx0A` was waiting and was stored in Vx.
    KeyReceived { x: u8, key: u8 },
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - the `keypad` with public interfaces for manipulating it
///
/// Supplies interfaces for:
/// - resetting and loading programs
/// - pressing and releasing keys
/// - stepping the CPU forwards and rewinding it
/// - ticking its timers
/// - inspecting its frame buffer for rendering by some display
///
/// The VM has no clock of its own: whoever owns it calls `step` at the instruction rate
/// and `tick_timers` at 60Hz (see `Clock`).
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    previous_states: VecDeque<State>,
    max_saved_states: usize,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A VM whose `Cxkk` results are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            keypad: Keypad::new(),
            previous_states: VecDeque::with_capacity(MAX_SAVED_STATES),
            max_saved_states: MAX_SAVED_STATES,
            rng,
        }
    }

    /// Sets how many past cycles are kept for `rewind`; 0 disables rewinding.
    pub fn with_rewind_depth(mut self, depth: usize) -> Self {
        self.max_saved_states = depth;
        self.previous_states = VecDeque::with_capacity(depth);
        self
    }

    /// Zeroes memory, registers, stack, timers and screen, reloads the sprite sheet and
    /// points the PC at 0x200. Rewind history is dropped; the keypad is left alone.
    /// The blank screen is flagged for redraw.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.state.draw_flag = true;
        self.previous_states.clear();
        debug!("reset");
    }

    /// Copies a program into memory at 0x200.
    ///
    /// Nothing below 0x200 is touched, so `reset` should come first. Programs larger than
    /// 3584 bytes are rejected and memory is left as it was.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        debug!("loaded {} byte program at {:#05X}", program.len(), start);
        Ok(())
    }

    /// Resets the VM and loads `rom` into it.
    pub fn load_rom(&mut self, rom: Rom) -> Result<(), Chip8Error> {
        self.reset();
        self.load_program(rom.as_bytes())
    }

    /// Runs a single fetch-decode-execute cycle.
    /// - if `Fx0A` is waiting, only checks the keypad
    /// - otherwise fetches, decodes and executes the opcode at the PC
    ///
    /// On error the state is left exactly as it was before the call.
    pub fn step(&mut self) -> Result<Cycle, Chip8Error> {
        if let Some(x) = self.state.awaiting_key {
            return Ok(self.poll_key(x));
        }

        let address = self.state.pc;
        let op = self.get_op()?;
        let instruction = Instruction::decode(op)?;
        trace!(
            "{:04X}: {} {:<16} v{:02X?} i{:04X}",
            address,
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i
        );

        let previous = self.state;
        self.state.skip();
        if let Err(e) = instruction.execute(&mut self.state, &self.keypad, &mut self.rng) {
            self.state.pc = address;
            return Err(e);
        }
        if self.state.awaiting_key.is_some() {
            // hold on the waiting instruction until a key goes down
            self.state.pc = address;
        }
        self.save_state(previous);

        Ok(Cycle::Executed {
            address,
            instruction,
        })
    }

    /// Moves the PC past the current instruction without running it.
    ///
    /// Used to step over an instruction that made `step` fail.
    pub fn skip_instruction(&mut self) {
        self.state.skip();
        self.state.awaiting_key = None;
    }

    /// Decrements the delay and sound timers once each. Meant to be called at 60Hz.
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                self.state = state;
                self.state.draw_flag = true;
                true
            }
            None => false,
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    /// Replaces the whole keypad with a fresh snapshot from the input device.
    pub fn set_keypad(&mut self, keys: [bool; KEY_COUNT]) {
        self.keypad.set_all(keys);
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The current screen contents.
    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the redraw flag
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether a tone should currently be playing.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Puts a state in previous_states
    /// - if there are already `max_saved_states` saved then the oldest is dropped
    fn save_state(&mut self, state: State) {
        if self.max_saved_states == 0 {
            return;
        }
        if self.previous_states.len() == self.max_saved_states {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(state);
    }

    /// While `Fx0A` is waiting, a cycle only checks for a pressed key.
    fn poll_key(&mut self, x: u8) -> Cycle {
        match self.keypad.first_pressed() {
            Some(key) => {
                self.state.v[x as usize] = key;
                self.state.awaiting_key = None;
                self.state.skip();
                Cycle::KeyReceived { x, key }
            }
            None => Cycle::AwaitingKey { x },
        }
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<Opcode, Chip8Error> {
        let pc = self.state.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Chip8Error::OutOfBoundsFetch { pc: self.state.pc });
        }
        Ok(Opcode::from_bytes(
            self.state.memory[pc],
            self.state.memory[pc + 1],
        ))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
