//! RNG module - piece sources for spawning
//!
//! A session asks its [`PieceSource`] for the kind of every new piece.
//!
//! - [`RandomPieces`]: uniform draw over the 7 kinds (probability 1/7 each), no bag.
//! - [`PieceSequence`]: cycles through a fixed list, for replays and tests.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Supplies the kind of each spawned piece.
pub trait PieceSource: Send + fmt::Debug {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random piece generator
#[derive(Debug, Clone)]
pub struct RandomPieces {
    rng: StdRng,
}

impl RandomPieces {
    /// Seeded generator; the same seed produces the same piece order.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw a type id in `1..=7`, each with equal probability.
    pub fn random_type_id(&mut self) -> u8 {
        self.rng.gen_range(1..=7)
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        let id = self.random_type_id();
        PieceKind::ALL[(id - 1) as usize]
    }
}

/// Deterministic source that repeats a fixed list of kinds
#[derive(Debug, Clone)]
pub struct PieceSequence {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl PieceSequence {
    /// Cycle through `kinds`. An empty list falls back to `I` pieces.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, index: 0 }
    }

    /// Source that only ever yields `kind`.
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for PieceSequence {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}
