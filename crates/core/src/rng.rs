//! RNG module - piece selection sources
//!
//! Pieces are chosen uniformly at random, each draw independent of the last.
//! The generator is a small LCG so a seed reproduces a whole game; a scripted
//! source replays a fixed sequence for tests and demos.

use std::fmt::Debug;

use crate::types::PieceKind;

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
    ///
    /// Uses the high bits; the low bits of an LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Where the spawner gets its pieces from
pub trait PieceSource: Debug {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform, independent selection over the seven kinds
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
    seed: u32,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Replays a fixed list of kinds, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl ScriptedSource {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    pub fn new(kinds: Vec<PieceKind>) -> Self {
        assert!(!kinds.is_empty(), "scripted source needs at least one piece");
        Self { kinds, pos: 0 }
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.pos];
        self.pos = (self.pos + 1) % self.kinds.len();
        kind
    }
}
