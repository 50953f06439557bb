//! Collision module - "would this piece hit something" predicates
//!
//! Every predicate looks at the occupied cells of a piece under a
//! hypothetical rotation/position and never mutates anything. Cells in rows
//! above the board (y < 0) never collide with board content.

use crate::board::Board;
use crate::game_state::FallingPiece;
use crate::types::{Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Would moving `dx` columns leave the board or overlap a filled cell?
pub fn would_hit_moving_horizontally(board: &Board, piece: &FallingPiece, dx: i8) -> bool {
    piece.cells().iter().any(|&(x, y)| {
        let nx = x + dx;
        if !Board::is_column_in_bounds(nx) {
            return true;
        }
        y >= 0 && board.is_occupied(nx, y)
    })
}

/// Is the piece resting on the floor or on a filled cell?
pub fn would_hit_falling(board: &Board, piece: &FallingPiece) -> bool {
    piece.cells().iter().any(|&(x, y)| {
        if y >= BOARD_HEIGHT as i8 - 1 {
            return true;
        }
        y + 1 >= 0 && board.is_occupied(x, y + 1)
    })
}

/// Would the piece collide after turning to `rotation`?
///
/// Cells below the floor are always rejected. Cells past the side walls are
/// only rejected with `check_bounds`; live play tolerates them and pushes the
/// piece back with [`push_inside_bounds`]. Overlap with filled cells inside
/// the walls is always rejected.
pub fn would_hit_at_rotation(
    board: &Board,
    piece: &FallingPiece,
    rotation: Rotation,
    check_bounds: bool,
) -> bool {
    let turned = FallingPiece {
        rotation,
        ..*piece
    };
    turned.cells().iter().any(|&(x, y)| {
        if y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if !Board::is_column_in_bounds(x) {
            return check_bounds;
        }
        y >= 0 && board.is_occupied(x, y)
    })
}

/// Does any cell overlap board content or sit outside the walls/floor?
pub fn overlaps(board: &Board, piece: &FallingPiece) -> bool {
    piece.cells().iter().any(|&(x, y)| {
        !Board::is_column_in_bounds(x)
            || y >= BOARD_HEIGHT as i8
            || (y >= 0 && board.is_occupied(x, y))
    })
}

/// Nudge the piece sideways, one column per offending cell, until every cell
/// is within `[0, BOARD_WIDTH)`.
pub fn push_inside_bounds(piece: &mut FallingPiece) {
    loop {
        let cells = piece.cells();
        if let Some(&(x, _)) = cells.iter().find(|&&(x, _)| x < 0) {
            piece.x += -x;
            continue;
        }
        if let Some(&(x, _)) = cells.iter().find(|&&(x, _)| x >= BOARD_WIDTH as i8) {
            piece.x -= x - BOARD_WIDTH as i8 + 1;
            continue;
        }
        break;
    }
}
