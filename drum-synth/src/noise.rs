//! Noise sources
//!
//! The engine consumes randomness in two ways: one fresh byte per block for
//! the bass drum pitch jitter, and the high byte of the generator state as
//! the seed of the per-sample noise recurrence. Both must be deterministic
//! for a given seed so renders can be reproduced.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Pseudo-random byte generator consumed by the render loop
pub trait NoiseSource {
    /// Advance the generator and return a fresh byte
    fn next_byte(&mut self) -> u8;

    /// Most significant byte of the current state, without advancing
    fn state_msb(&self) -> u8;
}

/// Seeded PCG-XSH-RR noise
#[derive(Debug, Clone)]
pub struct PcgNoise {
    rng: Pcg32,
    state: u32,
}

impl PcgNoise {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = rng.next_u32();
        Self { rng, state }
    }
}

impl NoiseSource for PcgNoise {
    fn next_byte(&mut self) -> u8 {
        self.state = self.rng.next_u32();
        (self.state >> 24) as u8
    }

    fn state_msb(&self) -> u8 {
        (self.state >> 24) as u8
    }
}
