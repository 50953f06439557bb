//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! shared by the core rules, the auto-play engine, input mapping and views.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 15 rows (indexed 0-14, row 0 at the top)
//!
//! # Timing
//!
//! Everything is counted in ticks (one `update` per frame):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FALL_INTERVAL_TICKS` | 30 | Ticks between gravity steps |
//! | `SOFT_DROP_DIVISOR` | 4 | Held down divides the interval by this |
//! | `AI_DECISION_DELAY_TICKS` | 15 | Ticks between auto-play intents |
//! | `ROW_COLLAPSE_UNITS` | 8 | Animation units per row of collapse |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.cell_id(), 7);
//!
//! assert_eq!(Rotation::R0.rotate_cw(), Rotation::R90);
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 15);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (15 rows)
pub const BOARD_HEIGHT: u8 = 15;

/// Ticks between gravity steps.
pub const FALL_INTERVAL_TICKS: u32 = 30;

/// Held soft drop shortens the fall interval to a quarter.
pub const SOFT_DROP_DIVISOR: u32 = 4;

/// Ticks the auto-player waits between two intents.
pub const AI_DECISION_DELAY_TICKS: u32 = 15;

/// Sub-row animation units a collapsing row travels per row moved.
pub const ROW_COLLAPSE_UNITS: u8 = 8;

/// Most rows a single clear can remove, and most clear passes per lock.
pub const MAX_CLEAR_PASSES: usize = 4;

/// Volume of the drop sound on lock-in.
pub const DROP_VOLUME_LOCK: u8 = 255;

/// Volume of the drop sound when collapsing rows settle.
pub const DROP_VOLUME_SETTLE: u8 = 160;

/// Number of shapes in the catalog.
pub const PIECE_COUNT: usize = 7;

/// The seven piece kinds, in catalog order
///
/// The board stores `index + 1` for an occupied cell, so the order here is
/// also the order of cell ids 1..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    Z,
    S,
    O,
    T,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::O,
        PieceKind::T,
    ];

    /// Catalog index (0-6).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Board cell value for this kind (1-7; 0 means empty).
    pub fn cell_id(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_cell_id(id: u8) -> Option<Self> {
        match id {
            0 => None,
            n => Self::from_index((n - 1) as usize),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Uppercase letter used by views and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::Z => "Z",
            PieceKind::S => "S",
            PieceKind::O => "O",
            PieceKind::T => "T",
        }
    }
}

/// Discrete rotation in quarter turns clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::R270.rotate_cw(), Rotation::R0);
    /// ```
    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Quarter turns, taken modulo 4.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }
}

/// Score formula applied per clear event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringRule {
    /// `cleared * 100`
    Classic,
    /// `cleared * 10 + total lines before this clear`
    #[default]
    Progressive,
}

impl ScoringRule {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(ScoringRule::Classic),
            "progressive" => Some(ScoringRule::Progressive),
            _ => None,
        }
    }
}

/// What happens when a freshly spawned piece overlaps the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpawnPolicy {
    /// Revert to no active piece; the top-row scan reports the loss.
    #[default]
    Defer,
    /// End the game on the spot.
    EndGame,
}

impl SpawnPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "defer" => Some(SpawnPolicy::Defer),
            "end" | "endgame" => Some(SpawnPolicy::EndGame),
            _ => None,
        }
    }
}

/// Tunable game rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub scoring: ScoringRule,
    pub spawn: SpawnPolicy,
    pub fall_interval_ticks: u32,
    pub soft_drop_divisor: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            scoring: ScoringRule::default(),
            spawn: SpawnPolicy::default(),
            fall_interval_ticks: FALL_INTERVAL_TICKS,
            soft_drop_divisor: SOFT_DROP_DIVISOR,
        }
    }
}

impl Rules {
    /// Gravity interval for this tick.
    pub fn fall_interval(&self, soft_drop: bool) -> u32 {
        if soft_drop {
            (self.fall_interval_ticks / self.soft_drop_divisor.max(1)).max(1)
        } else {
            self.fall_interval_ticks.max(1)
        }
    }
}

/// Physical buttons of the handheld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Rotate,
    Left,
    Right,
    Down,
    Confirm,
    Toggle,
}

impl Button {
    pub const ALL: [Button; 6] = [
        Button::Rotate,
        Button::Left,
        Button::Right,
        Button::Down,
        Button::Confirm,
        Button::Toggle,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Small bit set of buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: ButtonSet = ButtonSet(0);

    pub fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn remove(&mut self, button: Button) {
        self.0 &= !button.bit();
    }

    pub fn with(mut self, button: Button) -> Self {
        self.insert(button);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// One tick's view of the buttons.
///
/// `pressed`/`released` are edge-triggered, `held` is level-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub pressed: ButtonSet,
    pub released: ButtonSet,
    pub held: ButtonSet,
}

impl InputFrame {
    /// Derive edges from the previous and current held levels.
    pub fn from_levels(prev: ButtonSet, now: ButtonSet) -> Self {
        Self {
            pressed: ButtonSet(now.0 & !prev.0),
            released: ButtonSet(prev.0 & !now.0),
            held: now,
        }
    }
}

/// Intents the falling piece consumes in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInput {
    pub rotate: bool,
    /// -1 left, 0 none, +1 right.
    pub horizontal: i8,
    /// Held soft drop.
    pub soft_drop: bool,
}

impl TickInput {
    pub const IDLE: TickInput = TickInput {
        rotate: false,
        horizontal: 0,
        soft_drop: false,
    };

    /// Rotation and sideways steps are edge-triggered; soft drop is held.
    pub fn from_frame(frame: &InputFrame) -> Self {
        let horizontal = if frame.pressed.contains(Button::Left) {
            -1
        } else if frame.pressed.contains(Button::Right) {
            1
        } else {
            0
        };

        Self {
            rotate: frame.pressed.contains(Button::Rotate),
            horizontal,
            soft_drop: frame.held.contains(Button::Down),
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}

/// Event emitted by a game tick.
///
/// Audio and logging collaborators consume these; nothing feeds back into
/// the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Spawned {
        kind: PieceKind,
        next: PieceKind,
    },
    /// Piece locked into the grid; play the drop sound at `volume`.
    Locked {
        kind: PieceKind,
        volume: u8,
    },
    LinesCleared {
        count: u32,
        score_delta: u32,
        quad_streak: bool,
    },
    /// A collapsing row reached its place; play the drop sound at `volume`.
    RowsSettled {
        volume: u8,
    },
    GameOver {
        score: u32,
    },
}

impl GameEvent {
    /// Volume for events that trigger the drop sound.
    pub fn drop_sound(&self) -> Option<u8> {
        match self {
            GameEvent::Locked { volume, .. } | GameEvent::RowsSettled { volume } => Some(*volume),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Spawned { .. } => "spawned",
            GameEvent::Locked { .. } => "locked",
            GameEvent::LinesCleared { .. } => "linesCleared",
            GameEvent::RowsSettled { .. } => "rowsSettled",
            GameEvent::GameOver { .. } => "gameOver",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by the specified piece kind
pub type Cell = Option<PieceKind>;

/// Lifecycle of one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    Playing,
    Ended,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(FALL_INTERVAL_TICKS, 30);
        assert_eq!(FALL_INTERVAL_TICKS / SOFT_DROP_DIVISOR, 7);
        assert_eq!(AI_DECISION_DELAY_TICKS, 15);
        assert_eq!(MAX_CLEAR_PASSES, 4);
    }

    #[test]
    fn piece_kind_index_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
            assert_eq!(PieceKind::from_cell_id(kind.cell_id()), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
        assert_eq!(PieceKind::from_cell_id(0), None);
    }

    #[test]
    fn rotation_wraps() {
        let mut r = Rotation::R0;
        for _ in 0..4 {
            r = r.rotate_cw();
        }
        assert_eq!(r, Rotation::R0);
        assert_eq!(Rotation::from_index(6), Rotation::R180);
    }

    #[test]
    fn button_set_edges() {
        let prev = ButtonSet::EMPTY.with(Button::Left);
        let now = ButtonSet::EMPTY.with(Button::Rotate);
        let frame = InputFrame::from_levels(prev, now);
        assert!(frame.pressed.contains(Button::Rotate));
        assert!(frame.released.contains(Button::Left));
        assert!(frame.held.contains(Button::Rotate));
        assert!(!frame.held.contains(Button::Left));
    }

    #[test]
    fn tick_input_prefers_left_on_conflict() {
        let held = ButtonSet::EMPTY.with(Button::Left).with(Button::Right);
        let frame = InputFrame::from_levels(ButtonSet::EMPTY, held);
        assert_eq!(TickInput::from_frame(&frame).horizontal, -1);
    }

    #[test]
    fn rules_parse() {
        assert_eq!(ScoringRule::from_str("classic"), Some(ScoringRule::Classic));
        assert_eq!(
            ScoringRule::from_str("Progressive"),
            Some(ScoringRule::Progressive)
        );
        assert_eq!(SpawnPolicy::from_str("end"), Some(SpawnPolicy::EndGame));
        assert_eq!(SpawnPolicy::from_str("defer"), Some(SpawnPolicy::Defer));
        assert_eq!(SpawnPolicy::from_str("nope"), None);
    }
}
