//! Error type shared by the bandit, the trainer, and data providers.
//!
//! Every variant is a precondition violation or a collaborator failure that
//! is surfaced to the caller as-is. Nothing in this crate retries.
//!
//! There is deliberately no "invalid observation" variant: non-positive and
//! non-finite durations are clamped to `1` by [`crate::clamp_observation`].

/// Errors produced by `dwell`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `learn` (or a lookup) named an arm that was not in the constructor's arm list.
    #[error("unknown arm `{arm}`")]
    UnknownArm { arm: String },

    /// A bandit was constructed with no arms, so `select` has no answer.
    #[error("bandit requires at least one arm")]
    EmptyArmSet,

    /// A [`crate::BanditConfig`] field is out of its domain.
    #[error("invalid bandit config: {0}")]
    InvalidConfig(&'static str),

    /// The data provider has no record of this goal.
    #[error("unknown goal `{goal}`")]
    UnknownGoal { goal: String },

    /// Any other data-provider failure, passed through unchanged.
    #[error("intervention provider failed: {0}")]
    Provider(String),
}

/// Result alias with [`Error`] as the default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
