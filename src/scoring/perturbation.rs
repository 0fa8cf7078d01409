//! Confidence perturbation sources
//!
//! The engine never calls a random generator directly. It asks a
//! `Perturbation` for an offset, so tests can pin the offset.

use rand::Rng;

/// Source of the bounded offset added to confidence
pub trait Perturbation: Send + Sync {
    /// Offset in `[-magnitude, magnitude]`
    fn sample(&self, magnitude: f64) -> f64;
}

/// Uniform noise from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPerturbation;

impl Perturbation for UniformPerturbation {
    fn sample(&self, magnitude: f64) -> f64 {
        if magnitude <= 0.0 {
            return 0.0;
        }
        rand::thread_rng().gen_range(-magnitude..=magnitude)
    }
}

/// Always returns the same offset, clamped into range
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPerturbation(pub f64);

impl FixedPerturbation {
    pub fn zero() -> Self {
        Self(0.0)
    }
}

impl Perturbation for FixedPerturbation {
    fn sample(&self, magnitude: f64) -> f64 {
        // NaN passes through so the engine can reject it
        if self.0.is_nan() {
            return self.0;
        }
        self.0.clamp(-magnitude.abs(), magnitude.abs())
    }
}
