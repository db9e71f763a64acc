use crate::constants::KEY_COUNT;

/// # Keypad
/// Latched pressed/released status of the 16 hexadecimal keys.
///
/// Owned and written by the input side of the host; the interpreter only reads it.
/// The latch is `Copy` so the host can hand over a consistent snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of `key`; only the low nibble is used
    pub fn press(&mut self, key: u8) {
        self.keys[index(key)] = true;
    }

    /// Unset the pressed status of `key`; only the low nibble is used
    pub fn release(&mut self, key: u8) {
        self.keys[index(key)] = false;
    }

    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[index(key)]
    }

    /// The lowest-numbered key currently held down
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&pressed| pressed).map(|k| k as u8)
    }
}

fn index(key: u8) -> usize {
    (key & 0xF) as usize
}
