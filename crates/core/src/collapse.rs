//! Row-collapse animator
//!
//! After a clear, every row that moved down carries a visual offset (in
//! [`ROW_COLLAPSE_UNITS`] per row moved) that counts down one unit per tick.
//! New pieces do not spawn while any offset is nonzero.

use crate::types::{BOARD_HEIGHT, ROW_COLLAPSE_UNITS};

/// Per-row remaining animation distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowCollapse {
    offsets: [u8; BOARD_HEIGHT as usize],
}

impl RowCollapse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror a board collapse: rows above the cleared block move down by
    /// `count` carrying their pending offset plus `count` rows worth of
    /// travel; the vacated top rows start settled.
    pub fn record_collapse(&mut self, bottom: usize, count: usize) {
        if count == 0 || bottom >= BOARD_HEIGHT as usize || count > bottom + 1 {
            return;
        }

        let travel = (count as u8).saturating_mul(ROW_COLLAPSE_UNITS);
        for y in (count..=bottom).rev() {
            let src = self.offsets[y - count];
            self.offsets[y] = src.saturating_add(travel);
        }
        for offset in &mut self.offsets[..count] {
            *offset = 0;
        }
    }

    /// Advance one tick. Returns true when some row came to rest this tick.
    pub fn tick(&mut self) -> bool {
        let settling = self.offsets.contains(&1);
        for offset in &mut self.offsets {
            *offset = offset.saturating_sub(1);
        }
        settling
    }

    pub fn is_active(&self) -> bool {
        self.offsets.iter().any(|&o| o != 0)
    }

    pub fn offsets(&self) -> &[u8; BOARD_HEIGHT as usize] {
        &self.offsets
    }

    pub fn reset(&mut self) {
        self.offsets = [0; BOARD_HEIGHT as usize];
    }
}
