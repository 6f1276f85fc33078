//! Random source used by the spawner
//!
//! The field only needs two draws: a uniform float for spawn x and a biased
//! coin for drop/power-up kind. Hosts normally plug in `SeededRng`; tests use
//! scripted sources for exact replays.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

pub trait RandomSource {
    /// Uniform float in `[min, max]`
    fn uniform(&mut self, min: f32, max: f32) -> f32;
    /// True with probability `p` (clamped to [0, 1])
    fn bernoulli(&mut self, p: f32) -> bool;
}

/// Seed wrapper kept alongside the match for reproducibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> SeededRng {
        SeededRng::new(self.seed)
    }
}

/// Deterministic PCG-backed source
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRng {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn bernoulli(&mut self, p: f32) -> bool {
        // random_bool panics on NaN
        if !p.is_finite() {
            return false;
        }
        self.rng.random_bool(f64::from(p.clamp(0.0, 1.0)))
    }
}
