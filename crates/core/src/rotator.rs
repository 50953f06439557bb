//! Rotator module - maps local piece cells through a quarter-turn rotation
//!
//! Rotation pivots about the centre of the piece's bounding box. Working in
//! doubled coordinates keeps that centre on the integer lattice even for
//! odd-sized boxes:
//!
//! ```text
//! d = 2 * p + 1 - size          (cell centre relative to box centre, doubled)
//! (dx, dy) -> (-dy, dx)         (one quarter turn clockwise, y pointing down)
//! p' = floor((d + size - 1) / 2)
//! ```
//!
//! Halving back is done against the original box, so the result is an offset
//! from the box's top-left corner and may be negative or exceed the box.

use crate::types::Rotation;

/// A cell position in doubled, centre-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DoubledPoint {
    pub x: i16,
    pub y: i16,
}

impl DoubledPoint {
    /// Doubled centre-relative coordinates of local cell `(x, y)` in a `w x h` box.
    pub fn from_local(x: i8, y: i8, w: u8, h: u8) -> Self {
        Self {
            x: 2 * x as i16 + 1 - w as i16,
            y: 2 * y as i16 + 1 - h as i16,
        }
    }

    /// Exact quarter turns clockwise.
    pub fn rotated(self, quarter_turns: usize) -> Self {
        let mut p = self;
        for _ in 0..quarter_turns % 4 {
            p = DoubledPoint { x: -p.y, y: p.x };
        }
        p
    }

    /// Back to an offset from the top-left of the original `w x h` box.
    pub fn to_local(self, w: u8, h: u8) -> (i8, i8) {
        (
            (self.x + w as i16 - 1).div_euclid(2) as i8,
            (self.y + h as i16 - 1).div_euclid(2) as i8,
        )
    }
}

/// Map local cell `(x, y)` of a `w x h` box through `rotation`.
///
/// # Examples
///
/// ```
/// use blockfall_core::rotator::rotate;
/// use blockfall_core::types::Rotation;
///
/// // A 2x2 box turns in place.
/// assert_eq!(rotate((0, 0), 2, 2, Rotation::R90), (1, 0));
/// assert_eq!(rotate((0, 0), 2, 2, Rotation::R180), (1, 1));
/// ```
#[inline]
pub fn rotate(local: (i8, i8), w: u8, h: u8, rotation: Rotation) -> (i8, i8) {
    if rotation == Rotation::R0 {
        return local;
    }
    DoubledPoint::from_local(local.0, local.1, w, h)
        .rotated(rotation.index())
        .to_local(w, h)
}
