//! Bootstrap sensitivity analysis for target-set size bias.
//!
//! When one compound has far more targets than another, a better score may
//! just mean "more lottery tickets". Resampling fixed-size subsets from the
//! larger pool builds the distribution its score would have at the smaller
//! compound's target count; an observed value above the interval's upper
//! bound is not explainable by set size alone.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::stats;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BootstrapConfig {
    /// Subset size drawn per trial (the smaller compound's target count).
    pub sample_size: usize,
    pub trials: usize,
    /// Trial `i` draws from `ChaCha8(base_seed + i)`.
    pub base_seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self { sample_size: 9, trials: 100, base_seed: 42 }
    }
}

/// Empirical distribution of the statistic over resampled subsets.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BootstrapSummary {
    /// One value per successful trial, in trial order.
    pub values: Vec<f64>,
    pub mean: f64,
    pub std: f64,
    /// 2.5th percentile.
    pub ci_lower: f64,
    /// 97.5th percentile.
    pub ci_upper: f64,
}

impl BootstrapSummary {
    /// Whether an observed value sits inside the 95% interval.
    pub fn contains(&self, observed: f64) -> bool {
        observed >= self.ci_lower && observed <= self.ci_upper
    }

    /// Observed beyond the upper bound: the effect is not an artifact of the
    /// smaller target count.
    pub fn exceeds_upper(&self, observed: f64) -> bool {
        observed > self.ci_upper
    }
}

/// Resample `sample_size` targets from `pool` without replacement per trial
/// and collect `statistic` over the draws.
///
/// Trials whose statistic is unavailable are dropped. Panics if the pool is
/// smaller than the sample size; that is a setup error, not a data edge
/// case.
pub fn bootstrap_sensitivity<F>(pool: &[usize], config: &BootstrapConfig, statistic: F) -> BootstrapSummary
where
    F: Fn(&[usize]) -> Option<f64>,
{
    assert!(
        pool.len() >= config.sample_size,
        "target pool ({}) smaller than sample size ({})",
        pool.len(),
        config.sample_size
    );

    let mut values = Vec::with_capacity(config.trials);
    for trial in 0..config.trials {
        let mut rng = ChaCha8Rng::seed_from_u64(config.base_seed.wrapping_add(trial as u64));
        let sample: Vec<usize> =
            pool.choose_multiple(&mut rng, config.sample_size).copied().collect();
        if let Some(v) = statistic(&sample) {
            if !v.is_nan() {
                values.push(v);
            }
        }
    }

    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);

    BootstrapSummary {
        mean: stats::mean(&values),
        std: stats::std_dev(&values),
        ci_lower: stats::quantile(&sorted, 0.025),
        ci_upper: stats::quantile(&sorted, 0.975),
        values,
    }
}
