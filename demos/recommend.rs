//! Simulate a few weeks of sessions under three interventions and watch the
//! recommendation settle on the one that keeps sessions shortest.
//!
//! Run with `RUST_LOG=debug cargo run --example recommend` to see per-arm draws.

use dwell::{Bandit, BanditConfig, InMemoryProvider, Trainer, TracingObserver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, LogNormal};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

const GOAL: &str = "reduce-feed-time";

#[tokio::main]
async fn main() -> dwell::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // True median session length per intervention, in seconds.
    let truth = [("toast", 240.0f64), ("blur", 150.0), ("countdown", 90.0)];
    let mut env = StdRng::seed_from_u64(123);
    let mut provider = InMemoryProvider::new().with_goal(GOAL, truth.iter().map(|(a, _)| *a));

    for day in 0..21 {
        // Each day: ask for a recommendation, run a few sessions with it.
        let cfg = BanditConfig::default().with_seed(day);
        let trainer = Trainer::with_config(provider.clone(), cfg);
        let arm = trainer.recommend(GOAL).await?;
        let median = truth.iter().find(|(a, _)| *a == arm).map_or(1.0, |(_, m)| *m);
        let dist = LogNormal::new(median.ln(), 0.6)
            .map_err(|e| dwell::Error::Provider(e.to_string()))?;
        for _ in 0..4 {
            provider.record(GOAL, &arm, dist.sample(&mut env));
        }
        eprintln!("day={day:2} recommended={arm}");
    }

    let trainer = Trainer::new(provider);
    let (mut bandit, report): (Bandit, _) = trainer.train_with_report(GOAL, None).await?;
    eprintln!("trained: {report:?}");
    for (arm, p) in bandit.posteriors() {
        eprintln!(
            "{arm:>10}  mean={:.3} std={:.3} expected={:.1}s",
            p.mean,
            p.std,
            p.expected_duration()
        );
    }

    let mut picks: BTreeMap<String, usize> = BTreeMap::new();
    for _ in 0..1_000 {
        *picks.entry(bandit.select()).or_default() += 1;
    }
    eprintln!("allocation over 1000 draws: {picks:?}");

    let d = bandit.decide_observed(&mut TracingObserver);
    eprintln!("final recommendation: {}", d.chosen);
    Ok(())
}
