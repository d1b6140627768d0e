//! Training driver: build a bandit for a goal from its full history, then
//! recommend.
//!
//! ```text
//! let trainer = Trainer::new(provider);
//! let arm = trainer.recommend("goal").await?;   // construct, replay, select
//! ```
//!
//! Every call starts from the prior and replays the whole history; no state
//! is carried between calls.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::{Bandit, BanditConfig, InterventionProvider, Result};

/// Counts from one training run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainingReport {
    pub goal: String,
    /// Number of arms the bandit was built with (after de-duplication).
    pub arms: usize,
    /// Durations fed to `learn`.
    pub learned: usize,
    /// Durations belonging to interventions outside the arm set.
    pub skipped: usize,
    /// Interventions whose durations were skipped, sorted.
    pub skipped_interventions: Vec<String>,
}

/// Builds and warms up a [`Bandit`] per goal using an injected provider.
#[derive(Debug, Clone)]
pub struct Trainer<P> {
    provider: P,
    cfg: BanditConfig,
}

impl<P: InterventionProvider> Trainer<P> {
    /// Trainer using the default bandit config (deterministic seed 0).
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, BanditConfig::default())
    }

    pub fn with_config(provider: P, cfg: BanditConfig) -> Self {
        Self { provider, cfg }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &BanditConfig {
        &self.cfg
    }

    /// Bandit over the goal's enabled interventions, trained on its history.
    pub async fn train(&self, goal: &str) -> Result<Bandit> {
        self.train_with_report(goal, None).await.map(|(b, _)| b)
    }

    /// Bandit over caller-chosen arms, trained on the goal's history.
    pub async fn train_with_arms(&self, goal: &str, arms: Vec<String>) -> Result<Bandit> {
        self.train_with_report(goal, Some(arms)).await.map(|(b, _)| b)
    }

    /// Train, returning the bandit together with what was learned and skipped.
    ///
    /// `arms = None` asks the provider for the goal's enabled interventions.
    /// Durations for interventions outside the arm set are skipped rather
    /// than fed to [`Bandit::learn`] (which would reject them).
    pub async fn train_with_report(
        &self,
        goal: &str,
        arms: Option<Vec<String>>,
    ) -> Result<(Bandit, TrainingReport)> {
        let arms = match arms {
            Some(arms) => arms,
            None => self.provider.enabled_interventions(goal).await?,
        };
        let mut bandit = Bandit::with_config(arms, self.cfg)?;
        let history = self.provider.session_durations(goal).await?;

        let mut report = TrainingReport {
            goal: goal.to_string(),
            arms: bandit.arms().len(),
            ..TrainingReport::default()
        };
        let mut skipped: BTreeSet<String> = BTreeSet::new();
        for (intervention, durations) in history {
            if bandit.posterior(&intervention).is_err() {
                trace!(
                    goal,
                    intervention = %intervention,
                    n = durations.len(),
                    "skipping durations for intervention outside arm set"
                );
                report.skipped += durations.len();
                skipped.insert(intervention);
                continue;
            }
            report.learned += bandit.learn_many(&intervention, durations)?;
        }
        report.skipped_interventions = skipped.into_iter().collect();

        debug!(
            goal,
            arms = report.arms,
            learned = report.learned,
            skipped = report.skipped,
            "trained bandit"
        );
        Ok((bandit, report))
    }

    /// Train on the goal's enabled interventions and select once.
    pub async fn recommend(&self, goal: &str) -> Result<String> {
        let mut bandit = self.train(goal).await?;
        let chosen = bandit.select();
        debug!(goal, chosen = %chosen, "recommended intervention");
        Ok(chosen)
    }
}
