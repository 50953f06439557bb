//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under short module names
//! (`blockfall::{core, engine, input, scores, term, types}`) and adds the
//! pieces only the terminal runner needs: environment configuration, the
//! JSON-lines event log and the attract/play/score session flow.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_scores as scores;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod app;
pub mod config;
pub mod event_log;
