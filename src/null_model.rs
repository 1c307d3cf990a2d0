//! Degree-matched random target sets for permutation null models.
//!
//! Comparing a drug's targets against arbitrary random nodes confounds
//! "hubness" with biology: a hub target must be compared against other hubs.
//! Both samplers here preserve the target set's degree distribution while
//! never reusing a node within one trial and never returning an original
//! target as its own control.

use rand::prelude::*;

use crate::graph::Graph;

/// Per-target degree-band sampling.
///
/// For each target `t`, draws uniformly among nodes whose degree lies within
/// `max(1, tolerance * degree(t))` of `degree(t)` (call sites use both 0.15
/// and 0.25; the tolerance is always explicit). The floor of one degree
/// keeps low-degree targets matchable: a degree-1 target accepts degree-2
/// controls instead of falling straight through to the uniform fallback.
/// Excluded from the candidate pool: every original target and every node
/// already drawn in this call.
///
/// When the band holds no candidate, the draw falls back to a uniform pick
/// over all remaining non-target nodes. That is a weaker match, kept visible
/// through a `tracing` warning rather than silently widening the band. If
/// even the fallback pool is empty the result is simply shorter than
/// `targets` (tiny graphs only).
pub fn degree_matched_sample<G: Graph, R: Rng>(
    graph: &G,
    targets: &[usize],
    tolerance: f64,
    rng: &mut R,
) -> Vec<usize> {
    let n = graph.node_count();
    let mut taken = vec![false; n];
    for &t in targets {
        taken[t] = true;
    }

    let mut sampled = Vec::with_capacity(targets.len());
    let mut candidates: Vec<usize> = Vec::new();

    for &t in targets {
        let target_degree = graph.degree(t) as f64;
        let band = (tolerance * target_degree).max(1.0);

        candidates.clear();
        for node in 0..n {
            if taken[node] {
                continue;
            }
            if (graph.degree(node) as f64 - target_degree).abs() <= band {
                candidates.push(node);
            }
        }

        if candidates.is_empty() {
            // Weaker-match fallback: any remaining non-target node.
            candidates.extend((0..n).filter(|&node| !taken[node]));
            if !candidates.is_empty() {
                tracing::warn!(
                    target = t,
                    degree = target_degree,
                    "no degree-matched candidate; fell back to uniform sampling"
                );
            }
        }

        if let Some(&c) = candidates.choose(rng) {
            taken[c] = true;
            sampled.push(c);
        }
    }

    sampled
}

/// Degree-binned sampler for large-scale repeated permutation.
///
/// Nodes are sorted by degree and chunked into buckets of `bin_size`; a
/// target's control is drawn uniformly from the target's own bucket. One
/// construction amortizes over thousands of trials while keeping the same
/// degree-similarity guarantee as the band sampler.
#[derive(Debug, Clone)]
pub struct DegreeBins {
    bins: Vec<Vec<usize>>,
    bin_of: Vec<usize>,
}

impl DegreeBins {
    pub fn new<G: Graph>(graph: &G, bin_size: usize) -> Self {
        assert!(bin_size > 0, "bin_size must be positive");
        let n = graph.node_count();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&node| graph.degree(node));

        let mut bins: Vec<Vec<usize>> = Vec::new();
        let mut bin_of = vec![0usize; n];
        for chunk in order.chunks(bin_size) {
            let id = bins.len();
            for &node in chunk {
                bin_of[node] = id;
            }
            bins.push(chunk.to_vec());
        }
        Self { bins, bin_of }
    }

    /// Draw one degree-matched control set, bucket by bucket.
    ///
    /// Same hygiene as [`degree_matched_sample`]: no duplicates, no original
    /// targets, uniform fallback outside the bucket when it is exhausted.
    pub fn sample<R: Rng>(&self, targets: &[usize], rng: &mut R) -> Vec<usize> {
        let n = self.bin_of.len();
        let mut taken = vec![false; n];
        for &t in targets {
            if t < n {
                taken[t] = true;
            }
        }

        let mut sampled = Vec::with_capacity(targets.len());
        let mut candidates: Vec<usize> = Vec::new();

        for &t in targets {
            if t >= n {
                continue;
            }
            candidates.clear();
            candidates.extend(self.bins[self.bin_of[t]].iter().copied().filter(|&c| !taken[c]));
            if candidates.is_empty() {
                candidates.extend((0..n).filter(|&c| !taken[c]));
                if !candidates.is_empty() {
                    tracing::warn!(target = t, "degree bin exhausted; fell back to uniform sampling");
                }
            }
            if let Some(&c) = candidates.choose(rng) {
                taken[c] = true;
                sampled.push(c);
            }
        }

        sampled
    }
}
