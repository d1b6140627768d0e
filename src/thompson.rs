//! Thompson-sampling bandit over log-normal session durations.
//!
//! Each arm carries a [`GaussianPosterior`] over its latent log-duration.
//! [`Bandit::learn`] folds one observed duration into one arm's posterior;
//! [`Bandit::select`] samples every posterior once and picks the arm whose
//! sampled duration is shortest.
//!
//! Notes:
//! - The arm set is fixed at construction. `learn` on any other arm fails with
//!   [`Error::UnknownArm`] and changes nothing.
//! - Default construction uses a fixed seed (deterministic by default).
//! - Ties go to the arm earlier in the constructor's order.
//! - Replaying the same history twice is not a no-op: each `learn` adds
//!   precision, so the posterior ends up narrower than after one replay.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

use crate::quantile::{clamp_open_unit, standard_normal_quantile};
use crate::{
    ArmDraw, ArmSample, BanditConfig, Decision, DecisionNote, Error, GaussianPosterior,
    NoopObserver, Result, SelectionObserver, UniformSource,
};

/// Seedable Gaussian Thompson-sampling bandit for duration minimization.
#[derive(Debug, Clone)]
pub struct Bandit<S = StdRng> {
    cfg: BanditConfig,
    // Per-arm state (aligned to `arms` indices).
    arms: Vec<String>,
    posteriors: Vec<GaussianPosterior>,
    index: BTreeMap<String, usize>,
    source: S,
}

impl Bandit<StdRng> {
    /// Create a bandit with the default prior and a deterministic fixed seed (0).
    pub fn new<I, A>(arms: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self::with_config(arms, BanditConfig::default())
    }

    /// Create a bandit with the default prior and a fixed seed (reproducible).
    pub fn with_seed<I, A>(arms: I, seed: u64) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self::with_config(arms, BanditConfig::default().with_seed(seed))
    }

    /// Create a bandit from a config, seeding `StdRng` from `cfg.seed`
    /// (or from OS entropy when the seed is `None`).
    pub fn with_config<I, A>(arms: I, cfg: BanditConfig) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_source(arms, cfg, rng)
    }
}

impl<S: UniformSource> Bandit<S> {
    /// Create a bandit drawing its uniforms from `source`.
    ///
    /// `cfg.seed` is ignored; the source is used as given. Duplicate arm
    /// names collapse to their first occurrence.
    pub fn with_source<I, A>(arms: I, cfg: BanditConfig, source: S) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        cfg.validate()?;
        let mut list: Vec<String> = Vec::new();
        let mut index: BTreeMap<String, usize> = BTreeMap::new();
        for arm in arms {
            let arm = arm.into();
            if index.contains_key(&arm) {
                continue;
            }
            index.insert(arm.clone(), list.len());
            list.push(arm);
        }
        if list.is_empty() {
            return Err(Error::EmptyArmSet);
        }
        let posteriors = vec![cfg.prior(); list.len()];
        Ok(Self {
            cfg,
            arms: list,
            posteriors,
            index,
            source,
        })
    }

    /// The config this bandit was built with.
    pub fn config(&self) -> &BanditConfig {
        &self.cfg
    }

    /// Arms in selection order.
    pub fn arms(&self) -> &[String] {
        &self.arms
    }

    /// Current posterior for `arm`.
    pub fn posterior(&self, arm: &str) -> Result<GaussianPosterior> {
        self.slot(arm).map(|i| self.posteriors[i])
    }

    /// `(arm, posterior)` pairs in selection order.
    pub fn posteriors(&self) -> impl Iterator<Item = (&str, GaussianPosterior)> + '_ {
        self.arms
            .iter()
            .map(String::as_str)
            .zip(self.posteriors.iter().copied())
    }

    /// Posterior expected duration for `arm`.
    pub fn expected_duration(&self, arm: &str) -> Result<f64> {
        self.posterior(arm).map(|p| p.expected_duration())
    }

    /// The arm with the smallest posterior expected duration (no sampling).
    ///
    /// Useful for diagnostics; recommendations should come from [`Self::select`].
    /// Ties go to the earlier arm.
    pub fn greedy_arm(&self) -> &str {
        let mut best = 0;
        let mut best_duration = self.posteriors[0].expected_duration();
        for (i, p) in self.posteriors.iter().enumerate().skip(1) {
            let d = p.expected_duration();
            if d < best_duration {
                best = i;
                best_duration = d;
            }
        }
        &self.arms[best]
    }

    /// Fold one observed duration (any time unit) into `arm`'s posterior.
    ///
    /// Durations `<= 0` are treated as `1`. Only `arm` changes.
    pub fn learn(&mut self, arm: &str, observation: f64) -> Result<()> {
        let i = self.slot(arm)?;
        let noise_precision = self.cfg.noise_precision();
        self.posteriors[i] = self.posteriors[i].updated(observation, noise_precision);
        Ok(())
    }

    /// [`Self::learn`] each observation in order.
    pub fn learn_many<I>(&mut self, arm: &str, observations: I) -> Result<usize>
    where
        I: IntoIterator<Item = f64>,
    {
        let i = self.slot(arm)?;
        let noise_precision = self.cfg.noise_precision();
        let mut n = 0usize;
        for obs in observations {
            self.posteriors[i] = self.posteriors[i].updated(obs, noise_precision);
            n += 1;
        }
        Ok(n)
    }

    /// Thompson-sample an arm: the one whose sampled duration is shortest.
    pub fn select(&mut self) -> String {
        self.decide().chosen
    }

    /// [`Self::select`], reporting every arm's sample to `observer`.
    pub fn select_observed<O>(&mut self, observer: &mut O) -> String
    where
        O: SelectionObserver + ?Sized,
    {
        self.decide_observed(observer).chosen
    }

    /// [`Self::select`], returning the full audit record.
    pub fn decide(&mut self) -> Decision {
        self.decide_observed(&mut NoopObserver)
    }

    /// Sample each arm once, in arm order, and keep the largest reward.
    ///
    /// Per arm: `u` from the source, `z = Φ⁻¹(u)`, `θ = mean + std·z`,
    /// `reward = -exp(θ)`. The running best is replaced only on a strictly
    /// greater reward, compared as a strictly smaller `θ` so that draws whose
    /// `exp(θ)` overflows to the same `-inf` reward are still ordered.
    pub fn decide_observed<O>(&mut self, observer: &mut O) -> Decision
    where
        O: SelectionObserver + ?Sized,
    {
        let mut samples: Vec<ArmSample> = Vec::with_capacity(self.arms.len());
        let mut notes: Vec<DecisionNote> = Vec::new();
        let mut best = 0usize;

        for (i, (arm, &posterior)) in self.arms.iter().zip(self.posteriors.iter()).enumerate() {
            let uniform = self.source.next_uniform();
            if clamp_open_unit(uniform) != uniform {
                notes.push(DecisionNote::ClampedUniformDraw {
                    arm: arm.clone(),
                    uniform,
                });
            }
            let z = standard_normal_quantile(uniform);
            let theta = posterior.sample_theta(z);
            let reward = -theta.exp();
            let sample = ArmSample {
                arm: arm.clone(),
                posterior,
                draw: ArmDraw {
                    uniform,
                    z,
                    theta,
                    reward,
                },
            };
            observer.on_sample(&sample);
            if i > 0 && theta < samples[best].draw.theta {
                best = i;
            }
            samples.push(sample);
        }

        let best_theta = samples[best].draw.theta;
        let tied_with: Vec<String> = samples
            .iter()
            .skip(best + 1)
            .filter(|s| s.draw.theta == best_theta)
            .map(|s| s.arm.clone())
            .collect();

        notes.insert(
            0,
            if samples.len() == 1 {
                DecisionNote::SingleArm
            } else {
                DecisionNote::SampledPosteriorMax
            },
        );
        if !tied_with.is_empty() {
            notes.push(DecisionNote::TieKeptEarlierArm { tied_with });
        }

        let decision = Decision {
            chosen: self.arms[best].clone(),
            samples,
            notes,
        };
        observer.on_decision(&decision);
        decision
    }

    fn slot(&self, arm: &str) -> Result<usize> {
        self.index.get(arm).copied().ok_or_else(|| Error::UnknownArm {
            arm: arm.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedUniform, ScriptedUniform};

    fn ab() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn starts_at_the_prior() {
        let b = Bandit::new(["a", "b", "c"]).unwrap();
        for (_, p) in b.posteriors() {
            assert_eq!(p.mean, -0.5);
            assert_eq!(p.std, 1.0);
        }
        assert_eq!(b.arms().len(), 3);
    }

    #[test]
    fn empty_arm_set_is_rejected() {
        let r = Bandit::new(Vec::<String>::new());
        assert_eq!(r.unwrap_err(), Error::EmptyArmSet);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = BanditConfig::default().with_noise_std(0.0);
        assert!(matches!(
            Bandit::with_config(ab(), cfg),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn duplicate_arms_collapse_to_first_occurrence() {
        let b = Bandit::new(["x", "y", "x", "z", "y"]).unwrap();
        assert_eq!(b.arms(), &["x", "y", "z"]);
    }

    #[test]
    fn learn_unknown_arm_fails_without_side_effects() {
        let mut b = Bandit::new(ab()).unwrap();
        let before: Vec<_> = b.posteriors().map(|(_, p)| p).collect();
        let err = b.learn("nope", 3.0).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownArm {
                arm: "nope".to_string()
            }
        );
        let after: Vec<_> = b.posteriors().map(|(_, p)| p).collect();
        assert_eq!(before, after);
        assert!(b.posterior("nope").is_err());
        assert!(b.learn_many("nope", [1.0]).is_err());
    }

    #[test]
    fn learn_touches_only_the_target_arm() {
        let mut b = Bandit::new(["a", "b", "c"]).unwrap();
        b.learn("b", 30.0).unwrap();
        assert_eq!(b.posterior("a").unwrap(), BanditConfig::default().prior());
        assert_eq!(b.posterior("c").unwrap(), BanditConfig::default().prior());
        assert_ne!(b.posterior("b").unwrap(), BanditConfig::default().prior());
    }

    #[test]
    fn learn_many_matches_repeated_learn() {
        let obs = [3.0, 0.0, 12.5, 7.0];
        let mut one = Bandit::new(ab()).unwrap();
        for &o in &obs {
            one.learn("a", o).unwrap();
        }
        let mut many = Bandit::new(ab()).unwrap();
        assert_eq!(many.learn_many("a", obs).unwrap(), obs.len());
        assert_eq!(one.posterior("a").unwrap(), many.posterior("a").unwrap());
    }

    #[test]
    fn median_draws_pick_the_shorter_posterior_mean() {
        let mut b = Bandit::with_source(ab(), BanditConfig::default(), FixedUniform(0.5)).unwrap();
        b.learn("a", 10.0).unwrap();
        b.learn("b", 1.0).unwrap();
        let d = b.decide();
        assert_eq!(d.chosen, "b");
        for s in &d.samples {
            assert_eq!(s.draw.z, 0.0);
            assert_eq!(s.draw.theta, s.posterior.mean);
        }
        assert_eq!(d.notes[0], DecisionNote::SampledPosteriorMax);
    }

    #[test]
    fn equal_rewards_keep_the_earlier_arm() {
        let mut b =
            Bandit::with_source(["p", "q", "r"], BanditConfig::default(), FixedUniform(0.5))
                .unwrap();
        let d = b.decide();
        assert_eq!(d.chosen, "p");
        assert!(d.notes.contains(&DecisionNote::TieKeptEarlierArm {
            tied_with: vec!["q".to_string(), "r".to_string()]
        }));
    }

    #[test]
    fn zero_draw_is_clamped_and_finite() {
        let mut b = Bandit::with_source(ab(), BanditConfig::default(), FixedUniform(0.0)).unwrap();
        let d = b.decide();
        for s in &d.samples {
            assert!(s.draw.z.is_finite());
            assert!(s.draw.theta.is_finite());
            assert!(s.draw.reward < 0.0);
        }
        assert!(d.notes.iter().any(|n| matches!(
            n,
            DecisionNote::ClampedUniformDraw { arm, .. } if arm == "a"
        )));
        assert!(ab().contains(&d.chosen));
    }

    #[test]
    fn scripted_draws_override_posterior_order() {
        // "a" has the longer posterior but a very low draw; "b" a very high one.
        let mut b = Bandit::with_source(
            ab(),
            BanditConfig::default(),
            ScriptedUniform::new(vec![0.001, 0.999]),
        )
        .unwrap();
        b.learn("a", 10.0).unwrap();
        b.learn("b", 1.0).unwrap();
        assert_eq!(b.select(), "a");
    }

    #[test]
    fn overflowing_rewards_still_prefer_the_smaller_theta() {
        // Both exp(θ) overflow, so both rewards are -inf.
        let cfg = BanditConfig::default().with_prior(-0.5, 1000.0);
        let mut b =
            Bandit::with_source(ab(), cfg, ScriptedUniform::new(vec![0.9999, 0.999])).unwrap();
        let d = b.decide();
        let (a, bb) = (d.sample("a").unwrap(), d.sample("b").unwrap());
        assert!(a.draw.theta > 710.0 && bb.draw.theta > 710.0);
        assert_eq!(a.draw.reward, f64::NEG_INFINITY);
        assert_eq!(bb.draw.reward, f64::NEG_INFINITY);
        assert!(bb.draw.theta < a.draw.theta);
        assert_eq!(d.chosen, "b");
        assert!(!d
            .notes
            .iter()
            .any(|n| matches!(n, DecisionNote::TieKeptEarlierArm { .. })));
    }

    #[test]
    fn single_arm_always_wins() {
        let mut b = Bandit::with_seed(["only"], 11).unwrap();
        for _ in 0..50 {
            let d = b.decide();
            assert_eq!(d.chosen, "only");
            assert_eq!(d.notes[0], DecisionNote::SingleArm);
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let mut b1 = Bandit::with_seed(["a", "b", "c"], 42).unwrap();
        let mut b2 = Bandit::with_seed(["a", "b", "c"], 42).unwrap();
        for b in [&mut b1, &mut b2] {
            b.learn("a", 5.0).unwrap();
            b.learn("c", 2.0).unwrap();
        }
        let c1: Vec<String> = (0..20).map(|_| b1.select()).collect();
        let c2: Vec<String> = (0..20).map(|_| b2.select()).collect();
        assert_eq!(c1, c2);
    }

    #[test]
    fn observer_sees_every_arm_in_order() {
        let mut b = Bandit::with_seed(["a", "b", "c"], 3).unwrap();
        let mut seen: Vec<String> = Vec::new();
        let chosen = b.select_observed(&mut |s: &ArmSample| seen.push(s.arm.clone()));
        assert_eq!(seen, vec!["a", "b", "c"]);
        assert!(seen.contains(&chosen));
    }

    #[test]
    fn greedy_arm_tracks_expected_duration() {
        let mut b = Bandit::new(["slow", "fast"]).unwrap();
        assert_eq!(b.greedy_arm(), "slow");
        b.learn_many("slow", [60.0, 90.0]).unwrap();
        b.learn_many("fast", [5.0, 4.0]).unwrap();
        assert_eq!(b.greedy_arm(), "fast");
        assert!(b.expected_duration("fast").unwrap() < b.expected_duration("slow").unwrap());
    }
}
