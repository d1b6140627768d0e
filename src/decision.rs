//! Audit record of one Thompson-sampling selection.
//!
//! A [`Decision`] keeps every arm's draw, not just the winner, so a
//! recommendation can be logged and later replayed or explained.

use crate::GaussianPosterior;

/// One arm's draw during a selection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmDraw {
    /// Uniform draw fed to the quantile function (as produced by the source).
    pub uniform: f64,
    /// Standard-normal quantile of `uniform`.
    pub z: f64,
    /// Sampled latent log-duration, `mean + std * z`.
    pub theta: f64,
    /// `-exp(theta)`: negative sampled duration (higher is better).
    pub reward: f64,
}

/// One arm's draw plus the posterior it was drawn from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmSample {
    pub arm: String,
    pub posterior: GaussianPosterior,
    pub draw: ArmDraw,
}

/// Typed notes describing how a decision came about.
///
/// Prefer adding variants over changing existing semantics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecisionNote {
    /// Every arm's posterior was sampled and the largest reward won.
    SampledPosteriorMax,

    /// Only one arm exists; it wins regardless of its draw.
    SingleArm,

    /// Later arms drew exactly the winner's `θ`; the winner, being
    /// earlier in arm-list order, was kept.
    TieKeptEarlierArm { tied_with: Vec<String> },

    /// The source produced a draw outside `(0, 1)` for this arm; it was
    /// clamped before the quantile transform.
    ClampedUniformDraw { arm: String, uniform: f64 },
}

/// The outcome of one selection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    /// The selected arm.
    pub chosen: String,
    /// Per-arm samples, in arm-list order.
    pub samples: Vec<ArmSample>,
    /// Notes describing why this choice happened.
    pub notes: Vec<DecisionNote>,
}

impl Decision {
    /// The sample drawn for `arm`, if it is one of the bandit's arms.
    pub fn sample(&self, arm: &str) -> Option<&ArmSample> {
        self.samples.iter().find(|s| s.arm == arm)
    }

    /// The sample of the chosen arm.
    pub fn chosen_sample(&self) -> Option<&ArmSample> {
        self.sample(&self.chosen)
    }

    /// Sampled durations (`exp(theta)`) keyed by arm, in arm-list order.
    pub fn sampled_durations(&self) -> Vec<(&str, f64)> {
        self.samples
            .iter()
            .map(|s| (s.arm.as_str(), -s.draw.reward))
            .collect()
    }
}
