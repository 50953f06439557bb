//! RNG module - uniform piece generation with a single lookahead slot
//!
//! Pieces are drawn uniformly over the catalog from a small seedable LCG, so
//! the same seed always produces the same game. A fixed sequence source is
//! available for scripted scenarios.

use crate::types::{PieceKind, PIECE_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits cycle with short periods.
        (self.next_u32() >> 16) % max.max(1)
    }
}

/// Where new pieces come from.
#[derive(Debug, Clone)]
pub enum PieceSource {
    Random(SimpleRng),
    /// Cycles through a fixed order.
    Sequence { pieces: Vec<PieceKind>, index: usize },
}

impl PieceSource {
    fn draw(&mut self) -> PieceKind {
        match self {
            PieceSource::Random(rng) => {
                let i = rng.next_range(PIECE_COUNT as u32) as usize;
                PieceKind::ALL[i]
            }
            PieceSource::Sequence { pieces, index } => {
                let Some(&kind) = pieces.get(*index % pieces.len().max(1)) else {
                    return PieceKind::O;
                };
                *index = index.wrapping_add(1);
                kind
            }
        }
    }
}

/// Single-slot next-piece queue.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    next: PieceKind,
    source: PieceSource,
}

impl PieceQueue {
    /// Uniform random pieces from `seed`.
    pub fn random(seed: u32) -> Self {
        Self::from_source(PieceSource::Random(SimpleRng::new(seed)))
    }

    /// Pieces in the given order, repeating. An empty list yields `O` pieces.
    pub fn sequence(pieces: &[PieceKind]) -> Self {
        Self::from_source(PieceSource::Sequence {
            pieces: pieces.to_vec(),
            index: 0,
        })
    }

    fn from_source(mut source: PieceSource) -> Self {
        let next = source.draw();
        Self { next, source }
    }

    /// The lookahead piece.
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the lookahead piece and refill the slot.
    pub fn draw(&mut self) -> PieceKind {
        let kind = self.next;
        self.next = self.source.draw();
        kind
    }
}
