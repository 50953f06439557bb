//! Terminal input module.
//!
//! Maps `crossterm` key events onto the fixed button set and samples them
//! once per tick as an [`InputFrame`](crate::types::InputFrame) with
//! pressed/released edges and held levels. Terminals that never report key
//! releases are handled with a tick-count timeout.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::ButtonTracker;
pub use map::{map_key, should_quit};
