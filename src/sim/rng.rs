//! Injectable randomness
//!
//! The simulation never calls a global RNG. Every roll goes through a
//! [`RandomSource`], so a fixed seed (or a scripted sequence in tests)
//! reproduces the exact same spawn stream.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform rolls in `[0, 1)`
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_f32(&mut self) -> f32;

    /// Uniform index in `0..n` (n must be non-zero)
    fn next_index(&mut self, n: u8) -> u8 {
        let roll = (self.next_f32() * n as f32) as u8;
        roll.min(n.saturating_sub(1))
    }
}

/// Seeded PCG generator used by real games
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of rolls, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    rolls: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(rolls: impl Into<Vec<f32>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: 0,
        }
    }

    /// Number of rolls consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll.clamp(0.0, 0.999_999)
    }
}
