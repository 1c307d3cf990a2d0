//! # netprox
//!
//! Diffusion and shortest-path proximity statistics for network
//! pharmacology: given a protein-protein interaction network, a disease
//! gene set and drug target sets, quantify how close/influential each
//! drug's targets are relative to the disease genes and test the result
//! against degree-preserving random null models.
//!
//! Pipeline, leaf to root:
//! - [`graph::Network`]: string-labeled undirected topology (callers pass
//!   the largest connected component of their filtered interactome),
//! - [`transition::TransitionMatrix`]: column-stochastic walk matrix,
//!   optionally reweighted by [`expression::normalize_expression`],
//! - [`rwr::random_walk_with_restart`]: steady-state visitation scores,
//! - [`proximity::closest_distance`]: mean nearest-disease-gene distance,
//! - [`null_model`] + [`permutation`]: degree-matched empirical nulls,
//! - [`stats`] / [`report`]: z-scores, empirical p-values, FDR flags,
//! - [`bootstrap`]: target-set-size sensitivity intervals.
//!
//! Everything random is seeded (`ChaCha8`, one seed per trial), so a run is
//! reproducible bit-for-bit and, with the `parallel` feature, invariant to
//! thread count.

pub mod bootstrap;
pub mod error;
pub mod expression;
pub mod graph;
pub mod null_model;
pub mod permutation;
pub mod proximity;
pub mod report;
pub mod rwr;
pub mod stats;
pub mod transition;

pub use bootstrap::{bootstrap_sensitivity, BootstrapConfig, BootstrapSummary};
pub use error::{Error, Result};
pub use expression::{normalize_expression, EXPRESSION_FLOOR};
pub use graph::{AdjList, Graph, Network};
pub use null_model::{degree_matched_sample, DegreeBins};
#[cfg(feature = "parallel")]
pub use permutation::permutation_test_parallel;
pub use permutation::{
    permutation_test, permutation_test_with, PermutationConfig, PermutationSummary,
};
pub use proximity::{closest_distance, distances_from_set};
pub use report::{annotate_fdr, TestRecord, SIGNIFICANCE_LEVEL};
pub use rwr::{influence, random_walk_with_restart, RwrConfig};
pub use stats::{benjamini_hochberg, empirical_p, p_from_z, z_score, Tail};
pub use transition::TransitionMatrix;
