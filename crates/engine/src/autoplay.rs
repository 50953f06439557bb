//! Placement search and the paced auto-play driver.
//!
//! [`best_placement`] tries every rotation and every column from two left of
//! the board to two right of it, drops each candidate from the spawn row and
//! scores where it comes to rest. [`AutoPlayer`] runs the search once per
//! spawned piece and then walks the live piece toward the winner, one intent
//! every [`AI_DECISION_DELAY_TICKS`] ticks.

use crate::core::collision::{would_hit_at_rotation, would_hit_falling};
use crate::core::{Board, FallingPiece, GameState, PieceCells};
use crate::types::{PieceKind, Rotation, TickInput, AI_DECISION_DELAY_TICKS, BOARD_HEIGHT, BOARD_WIDTH};

/// Resting position chosen by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    /// Row of the bounding box's top edge once dropped.
    pub y: i8,
    pub score: i32,
}

impl Placement {
    /// Column 0, no rotation; used when nothing fits.
    pub fn fallback(kind: PieceKind) -> Self {
        let spawn = FallingPiece::spawn(kind);
        Self {
            kind,
            rotation: Rotation::R0,
            x: 0,
            y: spawn.y,
            score: 0,
        }
    }

    pub fn piece(&self) -> FallingPiece {
        FallingPiece {
            rotation: self.rotation,
            x: self.x,
            y: self.y,
            ..FallingPiece::spawn(self.kind)
        }
    }

    /// Board cells the piece occupies at rest.
    pub fn cells(&self) -> PieceCells {
        self.piece().cells()
    }
}

/// Score a resting piece: lower is better, overhangs cost half.
///
/// Each cell is worth its row squared. A cell with an empty board cell
/// directly beneath it that the piece itself does not fill keeps only half,
/// unless it sits on the floor. "Beneath" is board down for every rotation.
pub fn evaluate(board: &Board, piece: &FallingPiece) -> i32 {
    let cells = piece.cells();
    let floor = BOARD_HEIGHT as i8 - 1;

    cells
        .iter()
        .map(|&(x, y)| {
            let row = i32::from(y.max(0));
            let weight = row * row;
            let overhang =
                y < floor && !cells.contains(&(x, y + 1)) && !board.is_occupied(x, y + 1);
            if overhang {
                weight - weight / 2
            } else {
                weight
            }
        })
        .sum()
}

/// Exhaustive search for the best resting place of `kind`.
///
/// Ties keep the first candidate in rotation-major, left-to-right order.
pub fn best_placement(board: &Board, kind: PieceKind) -> Placement {
    let spawn = FallingPiece::spawn(kind);
    let mut best: Option<Placement> = None;

    for rotation in Rotation::ALL {
        for x in -2..=BOARD_WIDTH as i8 + 1 {
            let start = FallingPiece { x, ..spawn };
            if would_hit_at_rotation(board, &start, rotation, true) {
                continue;
            }

            let mut piece = FallingPiece { rotation, ..start };
            while !would_hit_falling(board, &piece) {
                piece.y += 1;
            }

            let score = evaluate(board, &piece);
            if best.map_or(true, |b| score > b.score) {
                best = Some(Placement {
                    kind,
                    rotation,
                    x,
                    y: piece.y,
                    score,
                });
            }
        }
    }

    best.unwrap_or_else(|| Placement::fallback(kind))
}

#[derive(Debug, Clone, Copy)]
struct Plan {
    serial: u32,
    target: Placement,
}

/// Drives a [`GameState`] toward searched placements at a human pace.
#[derive(Debug, Clone, Default)]
pub struct AutoPlayer {
    plan: Option<Plan>,
    delay: u32,
}

impl AutoPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the current plan; the next piece is searched afresh.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Placement the driver is steering toward, if any.
    pub fn target(&self) -> Option<Placement> {
        self.plan.map(|p| p.target)
    }

    /// Intents for this tick.
    ///
    /// Rotation comes first, then one column step at a time; once both match
    /// the driver holds soft drop until the piece locks.
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        let Some(piece) = state.active() else {
            return TickInput::IDLE;
        };

        let serial = state.piece_serial();
        let target = match self.plan {
            Some(plan) if plan.serial == serial => plan.target,
            _ => {
                let target = best_placement(state.board(), piece.kind);
                self.plan = Some(Plan { serial, target });
                self.delay = 0;
                target
            }
        };

        if piece.rotation == target.rotation && piece.x == target.x {
            return TickInput {
                soft_drop: true,
                ..TickInput::IDLE
            };
        }

        self.delay += 1;
        if self.delay < AI_DECISION_DELAY_TICKS {
            return TickInput::IDLE;
        }
        self.delay = 0;

        if piece.rotation != target.rotation {
            TickInput {
                rotate: true,
                ..TickInput::IDLE
            }
        } else {
            TickInput {
                horizontal: (target.x - piece.x).signum(),
                ..TickInput::IDLE
            }
        }
    }
}
