//! Bandit configuration: prior, observation noise, and RNG seeding.

use crate::{Error, GaussianPosterior, Result};

/// Prior mean of the latent log-duration.
///
/// Paired with [`DEFAULT_PRIOR_STD`] this makes the prior expected duration
/// `exp(mean + std²/2)` exactly `1`.
pub const DEFAULT_PRIOR_MEAN: f64 = -0.5;

/// Prior standard deviation of the latent log-duration.
pub const DEFAULT_PRIOR_STD: f64 = 1.0;

/// Standard deviation of `log(duration)` around the latent parameter.
pub const DEFAULT_NOISE_STD: f64 = 1.0;

/// Smallest accepted prior or noise standard deviation.
pub const MIN_STD: f64 = 1e-6;

/// Largest accepted prior or noise standard deviation.
pub const MAX_STD: f64 = 1e6;

/// Largest accepted `|prior_mean|`.
pub const MAX_ABS_PRIOR_MEAN: f64 = 1e6;

/// Configuration for a [`crate::Bandit`].
///
/// The noise standard deviation is a fixed constant for the lifetime of a
/// bandit; it is never learned from data.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BanditConfig {
    /// Prior mean of every arm's latent log-duration.
    pub prior_mean: f64,
    /// Prior standard deviation of every arm's latent log-duration (must be > 0).
    pub prior_std: f64,
    /// Observation noise standard deviation in log space (must be > 0).
    pub noise_std: f64,
    /// RNG seed. `None` seeds from OS entropy.
    ///
    /// Defaults to `Some(0)`: construction is deterministic unless asked otherwise.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

impl Default for BanditConfig {
    fn default() -> Self {
        Self {
            prior_mean: DEFAULT_PRIOR_MEAN,
            prior_std: DEFAULT_PRIOR_STD,
            noise_std: DEFAULT_NOISE_STD,
            seed: Some(0),
        }
    }
}

impl BanditConfig {
    /// Use a fixed seed (reproducible selection).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed from OS entropy on construction.
    pub fn with_entropy(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Override the prior.
    pub fn with_prior(mut self, mean: f64, std: f64) -> Self {
        self.prior_mean = mean;
        self.prior_std = std;
        self
    }

    /// Override the observation noise standard deviation.
    pub fn with_noise_std(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Check every field is inside its domain.
    ///
    /// Standard deviations must lie in `[MIN_STD, MAX_STD]` so the precisions
    /// the update works in (`1/std²`, `0.5/noise_precision`) stay finite and
    /// positive, and keep doing so as precision accumulates.
    pub fn validate(&self) -> Result<()> {
        if !(self.prior_mean.is_finite() && self.prior_mean.abs() <= MAX_ABS_PRIOR_MEAN) {
            return Err(Error::InvalidConfig("prior_mean must be finite and within ±1e6"));
        }
        if !in_std_range(self.prior_std) || !is_positive_finite(self.prior().precision()) {
            return Err(Error::InvalidConfig("prior_std must be in [1e-6, 1e6]"));
        }
        let noise_precision = self.noise_precision();
        if !in_std_range(self.noise_std)
            || !is_positive_finite(noise_precision)
            || !is_positive_finite(0.5 / noise_precision)
        {
            return Err(Error::InvalidConfig("noise_std must be in [1e-6, 1e6]"));
        }
        Ok(())
    }

    /// The posterior every arm starts from.
    pub fn prior(&self) -> GaussianPosterior {
        GaussianPosterior::new(self.prior_mean, self.prior_std)
    }

    /// `1 / noise_std²`.
    pub fn noise_precision(&self) -> f64 {
        1.0 / (self.noise_std * self.noise_std)
    }
}

fn in_std_range(std: f64) -> bool {
    (MIN_STD..=MAX_STD).contains(&std)
}

fn is_positive_finite(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prior_expects_unit_duration() {
        let cfg = BanditConfig::default();
        assert!(cfg.validate().is_ok());
        assert!((cfg.prior().expected_duration() - 1.0).abs() < 1e-12);
        assert_eq!(cfg.noise_precision(), 1.0);
    }

    #[test]
    fn rejects_degenerate_fields() {
        let bad = [
            BanditConfig::default().with_prior(f64::NAN, 1.0),
            BanditConfig::default().with_prior(0.0, 0.0),
            BanditConfig::default().with_prior(0.0, -1.0),
            BanditConfig::default().with_prior(0.0, f64::INFINITY),
            BanditConfig::default().with_noise_std(0.0),
            BanditConfig::default().with_noise_std(f64::NAN),
            BanditConfig::default().with_prior(f64::MAX, 1.0),
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(Error::InvalidConfig(_))),
                "{cfg:?}"
            );
        }
    }

    #[test]
    fn rejects_stds_whose_precision_overflows_or_vanishes() {
        let bad = [
            BanditConfig::default().with_noise_std(1e-200),
            BanditConfig::default().with_noise_std(1e200),
            BanditConfig::default().with_prior(-0.5, 1e-200),
            BanditConfig::default().with_prior(-0.5, 1e200),
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(Error::InvalidConfig(_))),
                "{cfg:?}"
            );
        }
    }

    #[test]
    fn extreme_accepted_configs_keep_the_posterior_finite() {
        let edges = [
            BanditConfig::default().with_noise_std(MIN_STD),
            BanditConfig::default().with_noise_std(MAX_STD),
            BanditConfig::default().with_prior(MAX_ABS_PRIOR_MEAN, MIN_STD),
            BanditConfig::default().with_prior(-MAX_ABS_PRIOR_MEAN, MAX_STD),
        ];
        for cfg in edges {
            assert!(cfg.validate().is_ok(), "{cfg:?}");
            let mut p = cfg.prior();
            for obs in [10.0, f64::MAX, 1e-300, 0.0] {
                p = p.updated(obs, cfg.noise_precision());
                assert!(p.mean.is_finite(), "{cfg:?} obs={obs} p={p:?}");
                assert!(p.std.is_finite() && p.std > 0.0, "{cfg:?} obs={obs} p={p:?}");
            }
        }
    }

    #[test]
    fn seed_builders() {
        assert_eq!(BanditConfig::default().seed, Some(0));
        assert_eq!(BanditConfig::default().with_seed(7).seed, Some(7));
        assert_eq!(BanditConfig::default().with_entropy().seed, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_seed_deserializes_as_entropy() {
        let cfg: BanditConfig =
            serde_json::from_str(r#"{"prior_mean":-0.5,"prior_std":1.0,"noise_std":1.0}"#)
                .unwrap();
        assert_eq!(cfg.seed, None);
        assert!(cfg.validate().is_ok());
    }
}
