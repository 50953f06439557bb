//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: views draw a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a framebuffer of styled
//! cells, and the renderer flushes only what changed since the last frame.
//! Board cells are two columns wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_scores as scores;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb, TextAlign};
pub use game_view::{draw_leaderboard, draw_name_entry, AnchorY, GameView, Overlay, ViewStatus, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
