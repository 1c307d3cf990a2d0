//! Expression normalization for transition-matrix weighting.

use std::collections::HashMap;

use crate::graph::Network;

/// Floor applied after min-max scaling so no node becomes an absolute dead
/// end: an exact-zero multiplier would zero out that node's outgoing column
/// and silently disconnect it.
pub const EXPRESSION_FLOOR: f64 = 0.01;

/// Normalize raw expression values (e.g. TPM) into per-node weights.
///
/// Per node: `log1p` of the raw value, then min-max scaled to [0, 1] across
/// the whole node set, then floored at [`EXPRESSION_FLOOR`]. Nodes missing
/// from the map count as raw 0.0. If every node carries the same value
/// (max == min) the weights are all 1.0, which makes expression weighting a
/// no-op after column normalization.
///
/// The result is indexed by the network's node indices.
pub fn normalize_expression(network: &Network, expression: &HashMap<String, f64>) -> Vec<f64> {
    let n = network.labels().len();
    let mut values: Vec<f64> = network
        .labels()
        .iter()
        .map(|l| expression.get(l).copied().unwrap_or(0.0).max(0.0).ln_1p())
        .collect();

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if n == 0 {
        return values;
    }
    if max > min {
        for v in &mut values {
            *v = ((*v - min) / (max - min)).max(EXPRESSION_FLOOR);
        }
    } else {
        values = vec![1.0; n];
    }
    values
}
