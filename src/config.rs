//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::types::{Rules, ScoringRule, SpawnPolicy};

pub const DEFAULT_SCORES_PATH: &str = "blockfall-scores.json";

/// Everything the runner reads from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: u32,
    pub rules: Rules,
    pub scores_path: PathBuf,
    /// JSON-lines event log; disabled when unset.
    pub log_path: Option<PathBuf>,
    /// Ring the terminal bell for drop sounds.
    pub bell: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            rules: Rules::default(),
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            log_path: None,
            bell: false,
        }
    }
}

impl AppConfig {
    /// Read `BLOCKFALL_*` variables. Unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = get("BLOCKFALL_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);

        let scoring = get("BLOCKFALL_SCORING")
            .and_then(|s| ScoringRule::from_str(&s))
            .unwrap_or_default();
        let spawn = get("BLOCKFALL_SPAWN")
            .and_then(|s| SpawnPolicy::from_str(&s))
            .unwrap_or_default();

        let scores_path = get("BLOCKFALL_SCORES_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.scores_path);
        let log_path = get("BLOCKFALL_LOG_PATH").map(PathBuf::from);

        let bell = get("BLOCKFALL_BELL")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Self {
            seed,
            rules: Rules {
                scoring,
                spawn,
                ..Rules::default()
            },
            scores_path,
            log_path,
            bell,
        }
    }
}
