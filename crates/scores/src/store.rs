//! Leaderboard persistence.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::leaderboard::{Leaderboard, ScoreEntry};

const SCORE_FILE_VERSION: u32 = 1;

/// Somewhere a leaderboard can be read from and written back to.
pub trait ScoreStore {
    fn load(&self) -> Result<Leaderboard>;
    fn save(&self, board: &Leaderboard) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    version: u32,
    entries: Vec<ScoreEntry>,
}

/// Pretty-printed JSON file. A missing file loads as an empty table.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Leaderboard> {
        if !self.path.exists() {
            return Ok(Leaderboard::default());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let file: ScoreFile = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", self.path.display()))?;
        Ok(Leaderboard::from_entries(file.entries))
    }

    fn save(&self, board: &Leaderboard) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let file = ScoreFile {
            version: SCORE_FILE_VERSION,
            entries: board.entries().to_vec(),
        };
        let text = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// In-process store; clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    board: Arc<Mutex<Option<Leaderboard>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(board: Leaderboard) -> Self {
        Self {
            board: Arc::new(Mutex::new(Some(board))),
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Leaderboard> {
        let guard = self
            .board
            .lock()
            .map_err(|_| anyhow::anyhow!("score store lock poisoned"))?;
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, board: &Leaderboard) -> Result<()> {
        let mut guard = self
            .board
            .lock()
            .map_err(|_| anyhow::anyhow!("score store lock poisoned"))?;
        *guard = Some(board.clone());
        Ok(())
    }
}
