//! Uniform random sources feeding the quantile transform.
//!
//! Any `rand` RNG is a [`UniformSource`]. The scripted sources here exist so
//! callers can pin the per-arm draws (and therefore `Z`) exactly.

use rand::{Rng, RngCore};

/// A source of uniform draws in `[0, 1)`.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl<R: RngCore> UniformSource for R {
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Always returns the same draw.
///
/// `FixedUniform(0.5)` makes every `Z` exactly `0`, so each arm's sampled
/// `θ` is its posterior mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedUniform(pub f64);

impl UniformSource for FixedUniform {
    fn next_uniform(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed sequence of draws, wrapping around at the end.
///
/// An empty script behaves like `FixedUniform(0.5)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedUniform {
    draws: Vec<f64>,
    pos: usize,
}

impl ScriptedUniform {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, pos: 0 }
    }
}

impl UniformSource for ScriptedUniform {
    fn next_uniform(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.5;
        }
        let u = self.draws[self.pos % self.draws.len()];
        self.pos = self.pos.wrapping_add(1);
        u
    }
}
