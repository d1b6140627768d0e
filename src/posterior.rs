//! Per-arm Gaussian posterior over the latent log-duration.
//!
//! Model: for an arm with latent parameter `θ`, an observed duration `d`
//! satisfies `log(d) ~ N(θ, σ̃²)` with `σ̃` fixed. The belief over `θ` is
//! Gaussian and the update is the known-variance conjugate update, carried
//! out in precision (inverse variance) space.

/// Replace a duration that cannot be log-transformed with `1`.
///
/// Durations `<= 0` (and non-finite ones) carry no usable signal, so they
/// are treated as the unit duration rather than rejected.
pub fn clamp_observation(observation: f64) -> f64 {
    if observation.is_finite() && observation > 0.0 {
        observation
    } else {
        1.0
    }
}

/// Gaussian belief `N(mean, std²)` over one arm's latent log-duration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaussianPosterior {
    pub mean: f64,
    pub std: f64,
}

impl GaussianPosterior {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }

    pub fn variance(&self) -> f64 {
        self.std * self.std
    }

    /// `1 / std²`.
    pub fn precision(&self) -> f64 {
        1.0 / self.variance()
    }

    /// Posterior expected duration, `E[exp(θ)] = exp(mean + std²/2)`.
    pub fn expected_duration(&self) -> f64 {
        (self.mean + 0.5 * self.variance()).exp()
    }

    /// The point `mean + std * z` of the posterior.
    pub fn sample_theta(&self, z: f64) -> f64 {
        self.mean + self.std * z
    }

    /// The posterior after one observed duration, given the noise precision `1/σ̃²`.
    ///
    /// The log observation is shifted by `σ̃²/2` before it is combined with
    /// the prior, since `E[exp(X)] = exp(θ + σ̃²/2)` for `X ~ N(θ, σ̃²)`.
    pub fn updated(&self, observation: f64, noise_precision: f64) -> Self {
        let observation = clamp_observation(observation);
        let old_precision = self.precision();
        let new_precision = old_precision + noise_precision;
        let shifted = observation.ln() + 0.5 / noise_precision;
        let mean = (noise_precision * shifted + old_precision * self.mean) / new_precision;
        let std = (1.0 / new_precision).sqrt();
        Self { mean, std }
    }
}
