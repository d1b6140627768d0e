//! Optional observability hook for selection.
//!
//! Selection itself never logs. Pass an observer to
//! [`crate::Bandit::decide_observed`] to see each arm's posterior and draw as
//! it happens; [`TracingObserver`] forwards them to `tracing`.

use tracing::{debug, Level};

use crate::{ArmSample, Decision};

/// Receives per-arm samples during a selection, then the final decision.
pub trait SelectionObserver {
    /// Called once per arm, in arm-list order, right after the arm is sampled.
    fn on_sample(&mut self, sample: &ArmSample);

    /// Called once after the winner is known.
    fn on_decision(&mut self, _decision: &Decision) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SelectionObserver for NoopObserver {
    fn on_sample(&mut self, _sample: &ArmSample) {}
}

/// Emits one `debug` event per sampled arm and one per decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SelectionObserver for TracingObserver {
    fn on_sample(&mut self, sample: &ArmSample) {
        if !tracing::enabled!(Level::DEBUG) {
            return;
        }
        debug!(
            arm = %sample.arm,
            mean = sample.posterior.mean,
            std = sample.posterior.std,
            z = sample.draw.z,
            reward = sample.draw.reward,
            "sampled arm"
        );
    }

    fn on_decision(&mut self, decision: &Decision) {
        debug!(
            chosen = %decision.chosen,
            arms = decision.samples.len(),
            notes = ?decision.notes,
            "selected arm"
        );
    }
}

impl<F> SelectionObserver for F
where
    F: FnMut(&ArmSample),
{
    fn on_sample(&mut self, sample: &ArmSample) {
        self(sample)
    }
}
