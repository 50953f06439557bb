//! Auto-play engine.
//!
//! A brute-force placement search plus a paced driver that turns the chosen
//! placement into per-tick intents, used for the attract-mode demo and the
//! in-game auto-play toggle.

pub mod autoplay;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use autoplay::{best_placement, evaluate, AutoPlayer, Placement};
