//! `dwell`: Thompson sampling for picking the intervention that minimizes
//! time spent.
//!
//! Designed for "which nudge next" problems: a goal has a small, fixed set of
//! candidate interventions (arms), each past session under an intervention
//! took some amount of time, and the next session should get whichever
//! intervention is believed to keep that time shortest, with enough
//! randomness that under-observed interventions still get tried.
//!
//! **Model.** Session durations are treated as log-normal. Each arm has a
//! latent log-duration `θ` with a Gaussian belief `N(mean, std²)`; an observed
//! duration `d` is `log(d) ~ N(θ, σ̃²)` with `σ̃ = 1`. The prior
//! `mean = -1/2, std = 1` makes the prior expected duration exactly `1`.
//!
//! **Goals:**
//! - **Deterministic by default**: same arms + history + seed → same choice.
//! - **Fail fast**: learning on an arm outside the arm set is an error, never
//!   silently created state.
//! - **Small K**: designed for a handful of arms per goal.
//!
//! **Components:**
//! - [`Bandit`]: per-arm [`GaussianPosterior`]s, [`Bandit::learn`] (conjugate
//!   update) and [`Bandit::select`] (Thompson draw via
//!   [`standard_normal_quantile`]).
//! - [`Decision`]: audit record of one selection (every arm's draw).
//! - [`SelectionObserver`] / [`TracingObserver`]: optional per-arm hook.
//! - [`UniformSource`]: the injected randomness (`rand` RNGs, or
//!   [`FixedUniform`] / [`ScriptedUniform`] to pin draws).
//! - [`InterventionProvider`] / [`Trainer`]: fetch a goal's arms and history,
//!   replay it into a fresh bandit, select.
//!
//! **Non-goals:**
//! - No persistence: a bandit lives for one training + selection call.
//! - No concurrent training of one bandit (`learn`/`select` take `&mut self`).
//! - No hyperparameter learning: `σ̃` is fixed per bandit.
//!
//! # Example
//!
//! ```rust
//! use dwell::Bandit;
//!
//! let mut bandit = Bandit::new(["toast", "blur", "timer"]).unwrap();
//! for secs in [300.0, 420.0, 380.0] {
//!     bandit.learn("toast", secs).unwrap();
//! }
//! bandit.learn("timer", 45.0).unwrap();
//!
//! let arm = bandit.select();
//! assert!(bandit.arms().contains(&arm));
//! ```

#![forbid(unsafe_code)]

mod error;
pub use error::*;

mod config;
pub use config::*;

mod quantile;
pub use quantile::*;

mod posterior;
pub use posterior::*;

mod source;
pub use source::*;

mod decision;
pub use decision::*;

mod observer;
pub use observer::*;

mod thompson;
pub use thompson::*;

mod provider;
pub use provider::*;

mod trainer;
pub use trainer::*;

/// Crate version, for tagging logged decisions.
pub const DWELL_VERSION: &str = env!("CARGO_PKG_VERSION");
