//! Injectable randomness for the estimator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the estimator's random perturbation.
pub trait VariationSource: Send {
    /// Next sample in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Uniform samples from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngVariation<R> {
    rng: R,
}

impl RngVariation<StdRng> {
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for demos and tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> VariationSource for RngVariation<R> {
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Always returns the same sample. Values outside `[0, 1)` are clamped.
#[derive(Debug, Clone, Copy)]
pub struct FixedVariation(pub f64);

impl VariationSource for FixedVariation {
    fn unit(&mut self) -> f64 {
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
