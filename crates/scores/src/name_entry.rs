//! Seven-slot name picker driven by button releases.

use crate::types::{Button, InputFrame};

pub const NAME_ALPHABET: &[u8; 31] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ.?!_ ";

pub const NAME_LEN: usize = 7;

/// Cursor over [`NAME_LEN`] slots, each an index into [`NAME_ALPHABET`].
///
/// Left/Right move the cursor, Rotate (up) and Down cycle the letter under
/// it. Everything wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NameEntry {
    slots: [u8; NAME_LEN],
    cursor: usize,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply one tick of input; acts on button release.
    pub fn update(&mut self, frame: &InputFrame) {
        let released = frame.released;
        if released.contains(Button::Left) {
            self.cursor = self.cursor.checked_sub(1).unwrap_or(NAME_LEN - 1);
        } else if released.contains(Button::Right) {
            self.cursor = (self.cursor + 1) % NAME_LEN;
        }

        let count = NAME_ALPHABET.len() as u8;
        let slot = &mut self.slots[self.cursor];
        if released.contains(Button::Rotate) {
            *slot = (*slot + 1) % count;
        } else if released.contains(Button::Down) {
            *slot = slot.checked_sub(1).unwrap_or(count - 1);
        }
    }

    /// Every slot as a character, including trailing blanks.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.slots
            .iter()
            .map(|&i| NAME_ALPHABET[i as usize] as char)
    }

    /// The chosen name with trailing spaces trimmed.
    pub fn name(&self) -> String {
        let name: String = self.chars().collect();
        name.trim_end_matches(' ').to_string()
    }
}
