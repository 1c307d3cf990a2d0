//! Column-stochastic transition matrices over a graph's adjacency structure.
//!
//! Layout is CSC-style: one contiguous (row, value) run per column, matching
//! the walk semantics `flow(j -> i) = W[i, j] * p[j]`. The nonzero pattern is
//! always exactly the adjacency pattern; expression weighting only rescales
//! existing entries.

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Sparse n×n column-stochastic matrix.
///
/// Invariants (tested):
/// - every entry is >= 0,
/// - every nonempty column sums to 1 within 1e-10,
/// - columns of isolated nodes are empty (an isolated node sends no flow).
#[derive(Debug, Clone)]
pub struct TransitionMatrix {
    n: usize,
    col_ptr: Vec<usize>,
    rows: Vec<usize>,
    vals: Vec<f64>,
}

impl TransitionMatrix {
    /// Standard transition matrix `W = A · D⁻¹`.
    ///
    /// Column `j` distributes mass uniformly over the neighbors of `j`.
    /// All-zero columns (isolated nodes) get divisor 1, i.e. they stay
    /// all-zero rather than dividing by zero.
    pub fn standard<G: Graph>(graph: &G) -> Result<Self> {
        Self::build(graph, None)
    }

    /// Expression-weighted transition matrix.
    ///
    /// `weights` is one multiplier per node, already normalized (see
    /// [`crate::expression::normalize_expression`]). The adjacency matrix is
    /// row-scaled by node weight, `A'[i, j] = A[i, j] * w[i]`, then each
    /// column is renormalized to sum to 1. A walker leaving `j` therefore
    /// prefers highly-expressed partners, so flow is carried through
    /// well-expressed proteins and starved through barely-expressed ones.
    pub fn expression_weighted<G: Graph>(graph: &G, weights: &[f64]) -> Result<Self> {
        assert_eq!(
            weights.len(),
            graph.node_count(),
            "one weight per node required"
        );
        Self::build(graph, Some(weights))
    }

    fn build<G: Graph>(graph: &G, weights: Option<&[f64]>) -> Result<Self> {
        let n = graph.node_count();
        if n == 0 {
            return Err(Error::EmptyGraph);
        }

        let mut col_ptr = Vec::with_capacity(n + 1);
        let mut rows = Vec::new();
        let mut vals = Vec::new();
        col_ptr.push(0);

        for j in 0..n {
            let nbrs = graph.neighbors(j);
            let col_sum: f64 = match weights {
                Some(w) => nbrs.iter().map(|&i| w[i]).sum(),
                None => nbrs.len() as f64,
            };
            // Isolated node: empty column, divisor forced to 1.
            let divisor = if col_sum > 0.0 { col_sum } else { 1.0 };
            for &i in nbrs {
                let raw = match weights {
                    Some(w) => w[i],
                    None => 1.0,
                };
                rows.push(i);
                vals.push(raw / divisor);
            }
            col_ptr.push(rows.len());
        }

        if rows.is_empty() {
            return Err(Error::DegenerateGraph { nodes: n });
        }

        Ok(Self { n, col_ptr, rows, vals })
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Number of stored (nonzero-pattern) entries.
    pub fn nnz(&self) -> usize {
        self.rows.len()
    }

    /// Borrowed `(rows, values)` run for one column.
    pub fn column(&self, j: usize) -> (&[usize], &[f64]) {
        let lo = self.col_ptr[j];
        let hi = self.col_ptr[j + 1];
        (&self.rows[lo..hi], &self.vals[lo..hi])
    }

    /// Sum of one column's entries (0.0 for an isolated node's column).
    pub fn column_sum(&self, j: usize) -> f64 {
        let (_, vals) = self.column(j);
        vals.iter().sum()
    }

    /// `out = W · p`. Both slices must have length `node_count`.
    pub fn apply(&self, p: &[f64], out: &mut [f64]) {
        debug_assert_eq!(p.len(), self.n);
        debug_assert_eq!(out.len(), self.n);
        out.fill(0.0);
        for j in 0..self.n {
            let pj = p[j];
            if pj == 0.0 {
                continue;
            }
            let (rows, vals) = self.column(j);
            for (&i, &v) in rows.iter().zip(vals) {
                out[i] += v * pj;
            }
        }
    }
}
