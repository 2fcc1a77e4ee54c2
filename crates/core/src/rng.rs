//! RNG module - 7-bag random piece generation
//!
//! Each bag holds one spec of every kind, shuffled. Specs are dealt from the bag
//! until it is empty, then a fresh bag is shuffled. Any 7 draws aligned to a bag
//! boundary contain every kind exactly once, and no kind can be missing for more
//! than 12 draws in a row.
//!
//! Shuffling uses a small seeded LCG so a seed reproduces the whole sequence.

use arrayvec::ArrayVec;

use crate::pieces::{PieceSpec, PIECE_SPECS};

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
    /// Uses the high bits; the low bits of a power-of-two LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceFactory {
    /// Specs left in the current bag; drawn from the back
    bag: ArrayVec<PieceSpec, 7>,
    rng: SimpleRng,
}

impl PieceFactory {
    /// Create a factory with the given seed. The first bag is shuffled lazily.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Refill with all seven specs and shuffle
    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend(PIECE_SPECS);
        self.rng.shuffle(&mut self.bag);
    }

    /// Deal the next spec, reshuffling first if the bag is empty.
    pub fn gen_piece(&mut self) -> PieceSpec {
        if self.bag.is_empty() {
            self.refill_bag();
        }
        match self.bag.pop() {
            Some(spec) => spec,
            // refill_bag always leaves seven specs behind
            None => PIECE_SPECS[0],
        }
    }

    /// Specs still in the current bag.
    pub fn remaining(&self) -> &[PieceSpec] {
        &self.bag
    }
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::new(1)
    }
}
