//! Core game logic - pure, deterministic and testable
//!
//! Everything that decides what happens on the board lives here: the piece
//! catalog and rotator, collision predicates, the line-clear engine, scoring,
//! the row-collapse animator and the tick-driven [`GameState`] machine. No
//! terminal, file or clock access; the same seed and the same inputs always
//! produce the same game.
//!
//! # Module Structure
//!
//! - [`board`]: 10x15 grid of cells
//! - [`pieces`]: static catalog of seven pieces as 2x4 masks
//! - [`rotator`]: quarter-turn rotation about the bounding-box centre
//! - [`collision`]: side, floor and rotation hit tests
//! - [`line_clear`]: multi-pass clear of contiguous full rows
//! - [`scoring`]: progressive or classic points, quad-streak multiplier
//! - [`collapse`]: per-row fall animation after a clear
//! - [`rng`]: seedable uniform piece source with one lookahead slot
//! - [`game_state`]: spawn, fall, lock, loss
//! - [`snapshot`]: read-only view data for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::TickInput;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! // The first tick spawns a piece.
//! let events = game.tick(TickInput::IDLE);
//! assert!(!events.is_empty());
//! assert!(game.active().is_some());
//! ```
//!
//! # Timing
//!
//! One call to [`GameState::tick`](game_state::GameState::tick) is one
//! logical tick. Gravity steps every 30 ticks, every 7 while soft drop is
//! held; the caller decides how ticks map to wall-clock time.

pub mod board;
pub mod collapse;
pub mod collision;
pub mod game_state;
pub mod line_clear;
pub mod pieces;
pub mod rng;
pub mod rotator;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collapse::RowCollapse;
pub use game_state::{FallingPiece, GameState, TickEvents};
pub use line_clear::{check_lines, ClearPass, ClearReport};
pub use pieces::{get_shape, piece_def, spawn_position, PieceCells, PieceDef, CATALOG};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{ScoreResult, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
