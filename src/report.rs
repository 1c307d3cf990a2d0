//! Result records handed to downstream reporting.
//!
//! One record per (compound, metric, network) combination. This is the sole
//! contract between the engine and any presentation layer; the engine never
//! learns what file format, if any, the records end up in.

use crate::permutation::PermutationSummary;
use crate::stats;

/// Significance threshold applied after FDR correction.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestRecord {
    pub compound: String,
    /// Metric label, e.g. "rwr_influence" or "shortest_path_dc".
    pub metric: String,
    /// Network label, e.g. the confidence threshold it was built at.
    pub network: String,
    /// Target-set size after filtering to graph membership.
    pub n_targets: usize,
    pub observed: f64,
    pub null_mean: f64,
    pub null_std: f64,
    pub z_score: f64,
    pub p_value: f64,
    /// Benjamini-Hochberg adjusted p; NaN until [`annotate_fdr`] runs over
    /// the batch.
    pub p_fdr: f64,
    pub significant: bool,
}

impl TestRecord {
    pub fn new(
        compound: impl Into<String>,
        metric: impl Into<String>,
        network: impl Into<String>,
        n_targets: usize,
        summary: &PermutationSummary,
    ) -> Self {
        Self {
            compound: compound.into(),
            metric: metric.into(),
            network: network.into(),
            n_targets,
            observed: summary.observed,
            null_mean: summary.null_mean,
            null_std: summary.null_std,
            z_score: summary.z_score,
            p_value: summary.p_value,
            p_fdr: f64::NAN,
            significant: false,
        }
    }
}

/// Apply Benjamini-Hochberg correction across a batch of records and set
/// each `significant` flag from the adjusted p-value.
///
/// Records with NaN p-values (metric unavailable for that combination) keep
/// NaN and are never significant; the rest of the batch is corrected as if
/// they were absent.
pub fn annotate_fdr(records: &mut [TestRecord]) {
    let raw: Vec<f64> = records.iter().map(|r| r.p_value).collect();
    let adjusted = stats::benjamini_hochberg(&raw);
    for (record, p_fdr) in records.iter_mut().zip(adjusted) {
        record.p_fdr = p_fdr;
        record.significant = p_fdr < SIGNIFICANCE_LEVEL;
    }
}
