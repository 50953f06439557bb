//! Top-ten score table, sorted descending.

use serde::{Deserialize, Serialize};

pub const NUM_ENTRIES: usize = 10;

/// Longest name stored in the table, in characters.
pub const MAX_NAME_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self {
            entries: vec![ScoreEntry::default(); NUM_ENTRIES],
        }
    }
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from loaded entries, re-sorting and padding or cutting
    /// to exactly ten rows.
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        for entry in &mut entries {
            truncate_name(&mut entry.name);
        }
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.resize(NUM_ENTRIES, ScoreEntry::default());
        Self { entries }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn lowest(&self) -> u32 {
        self.entries.last().map_or(0, |e| e.score)
    }

    /// Would `score` make it onto the table?
    pub fn can_add_score(&self, score: u32) -> bool {
        score > self.lowest()
    }

    /// Insert before the first strictly lower entry and drop the last row.
    ///
    /// Returns the rank the entry landed at, or `None` (table untouched)
    /// when the score does not qualify.
    pub fn add_score(&mut self, name: &str, score: u32) -> Option<usize> {
        let rank = self.entries.iter().position(|e| e.score < score)?;

        let mut name = name.to_string();
        truncate_name(&mut name);
        self.entries.insert(rank, ScoreEntry { name, score });
        self.entries.truncate(NUM_ENTRIES);
        Some(rank)
    }
}

fn truncate_name(name: &mut String) {
    if let Some((cut, _)) = name.char_indices().nth(MAX_NAME_LEN) {
        name.truncate(cut);
    }
}
