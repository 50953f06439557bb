use crate::game_state::FallingPiece;
use crate::types::{PieceKind, Rotation, SessionPhase, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<FallingPiece> for ActiveSnapshot {
    fn from(value: FallingPiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only copy of everything a view needs to draw one frame.
///
/// Board cells are `0` for empty, otherwise [`PieceKind::cell_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// Remaining collapse animation per row, in sub-row units.
    pub row_offsets: [u8; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub phase: SessionPhase,
    pub score: u32,
    pub lines: u32,
    pub last_clear_was_quad: bool,
    pub piece_serial: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn game_over(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    pub fn playable(&self) -> bool {
        self.phase == SessionPhase::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            row_offsets: [0; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            phase: SessionPhase::NotStarted,
            score: 0,
            lines: 0,
            last_clear_was_quad: false,
            piece_serial: 0,
        }
    }
}
