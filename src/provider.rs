//! Data-provider seam: where goals, enabled interventions, and historical
//! session durations come from.
//!
//! The bandit never fetches anything itself. A [`crate::Trainer`] is handed a
//! provider at construction and awaits its two lookups in sequence.

use std::collections::BTreeMap;
use std::future::Future;

use crate::{Error, Result};

/// Goal-keyed lookups a trainer needs.
pub trait InterventionProvider {
    /// Interventions currently enabled for `goal`, in recommendation order.
    fn enabled_interventions(
        &self,
        goal: &str,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Historical session durations for `goal`, keyed by intervention, each
    /// list in the order the sessions happened.
    ///
    /// May include interventions that are no longer enabled.
    fn session_durations(
        &self,
        goal: &str,
    ) -> impl Future<Output = Result<BTreeMap<String, Vec<f64>>>> + Send;
}

/// Everything an [`InMemoryProvider`] knows about one goal.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoalHistory {
    pub enabled: Vec<String>,
    pub durations: BTreeMap<String, Vec<f64>>,
}

/// Map-backed provider, for callers that already hold the data (and tests).
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    goals: BTreeMap<String, GoalHistory>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `goal` with its enabled interventions (replacing any previous list).
    pub fn with_goal<I, A>(mut self, goal: impl Into<String>, enabled: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.set_enabled(goal, enabled);
        self
    }

    pub fn set_enabled<I, A>(&mut self, goal: impl Into<String>, enabled: I)
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.goals.entry(goal.into()).or_default().enabled =
            enabled.into_iter().map(Into::into).collect();
    }

    /// Append one session duration for `intervention` under `goal`.
    pub fn record(&mut self, goal: &str, intervention: &str, duration: f64) {
        self.goals
            .entry(goal.to_string())
            .or_default()
            .durations
            .entry(intervention.to_string())
            .or_default()
            .push(duration);
    }

    pub fn goal(&self, goal: &str) -> Option<&GoalHistory> {
        self.goals.get(goal)
    }

    fn lookup(&self, goal: &str) -> Result<&GoalHistory> {
        self.goals.get(goal).ok_or_else(|| Error::UnknownGoal {
            goal: goal.to_string(),
        })
    }
}

impl InterventionProvider for InMemoryProvider {
    async fn enabled_interventions(&self, goal: &str) -> Result<Vec<String>> {
        self.lookup(goal).map(|h| h.enabled.clone())
    }

    async fn session_durations(&self, goal: &str) -> Result<BTreeMap<String, Vec<f64>>> {
        self.lookup(goal).map(|h| h.durations.clone())
    }
}
