use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
///
/// The keypad is written by whatever is translating physical input and only read by the
/// interpreter, with the exception of `Fx0A` which copies a pressed key into a register.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            keys: [false; KEY_COUNT],
        }
    }

    /// Keys outside of 0x0..=0xF are ignored.
    pub fn press(&mut self, key: u8) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = false;
        }
    }

    /// Replaces the pressed status of every key at once.
    pub fn set_all(&mut self, keys: [bool; KEY_COUNT]) {
        self.keys = keys;
    }

    /// Only the low nibble of `key` selects a key.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0x0F) as usize]
    }

    /// The lowest-indexed key that is currently down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|key| key as u8)
    }
}
