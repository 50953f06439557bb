//! Pieces module - the static piece catalog
//!
//! Each entry is a 2x4 occupancy mask in local coordinates plus the mask's
//! bounding box. Rotated cells come from [`crate::rotator::rotate`].

use arrayvec::ArrayVec;

use crate::rotator::rotate;
use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Most occupied cells a mask can hold.
pub const MAX_PIECE_CELLS: usize = 8;

/// Offset of a single cell relative to the piece position.
pub type CellOffset = (i8, i8);

/// Occupied cells of a piece under some rotation.
pub type PieceCells = ArrayVec<CellOffset, MAX_PIECE_CELLS>;

/// Immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDef {
    pub mask: [[bool; 4]; 2],
    pub width: u8,
    pub height: u8,
}

impl PieceDef {
    /// Occupied local cells, row-major.
    pub fn local_cells(&self) -> impl Iterator<Item = CellOffset> + '_ {
        (0..self.height as i8).flat_map(move |y| {
            (0..self.width as i8)
                .filter(move |&x| self.mask[y as usize][x as usize])
                .map(move |x| (x, y))
        })
    }

    /// Occupied cells after `rotation`, relative to the piece position.
    pub fn cells(&self, rotation: Rotation) -> PieceCells {
        self.local_cells()
            .map(|p| rotate(p, self.width, self.height, rotation))
            .collect()
    }
}

const X: bool = true;
const O: bool = false;

/// Catalog in [`PieceKind`] order: I, J, L, Z, S, O, T.
pub static CATALOG: [PieceDef; 7] = [
    // I
    PieceDef {
        mask: [[X, X, X, X], [O, O, O, O]],
        width: 4,
        height: 1,
    },
    // J
    PieceDef {
        mask: [[X, O, O, O], [X, X, X, O]],
        width: 3,
        height: 2,
    },
    // L
    PieceDef {
        mask: [[O, O, X, O], [X, X, X, O]],
        width: 3,
        height: 2,
    },
    // Z
    PieceDef {
        mask: [[X, X, O, O], [O, X, X, O]],
        width: 3,
        height: 2,
    },
    // S
    PieceDef {
        mask: [[O, X, X, O], [X, X, O, O]],
        width: 3,
        height: 2,
    },
    // O
    PieceDef {
        mask: [[X, X, O, O], [X, X, O, O]],
        width: 2,
        height: 2,
    },
    // T
    PieceDef {
        mask: [[O, X, O, O], [X, X, X, O]],
        width: 3,
        height: 2,
    },
];

/// Catalog entry for a kind.
#[inline]
pub fn piece_def(kind: PieceKind) -> &'static PieceDef {
    &CATALOG[kind.index()]
}

/// Rotated cell offsets for a kind.
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceCells {
    piece_def(kind).cells(rotation)
}

/// Spawn position: horizontally centred, bottom row on board row 0.
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    let def = piece_def(kind);
    let x = (BOARD_WIDTH / 2) as i8 - (def.width / 2) as i8;
    let y = 1 - def.height as i8;
    (x, y)
}
