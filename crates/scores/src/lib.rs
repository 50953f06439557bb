//! High-score table, name entry and persistence.
//!
//! These are consulted only between games: the session asks the
//! [`Leaderboard`] whether a final score qualifies, lets the player spell a
//! name with [`NameEntry`], then writes the table back through a
//! [`ScoreStore`].

pub mod leaderboard;
pub mod name_entry;
pub mod store;

pub use blockfall_types as types;

pub use leaderboard::{Leaderboard, ScoreEntry, MAX_NAME_LEN, NUM_ENTRIES};
pub use name_entry::{NameEntry, NAME_ALPHABET, NAME_LEN};
pub use store::{JsonFileStore, MemoryStore, ScoreStore};
