//! Shortest-path proximity: mean distance from targets to the nearest
//! disease gene.
//!
//! One multi-source BFS from the disease set computes "distance to the
//! nearest disease gene" for every node in a single pass, instead of a BFS
//! per target. Output is identical to the per-target formulation.

use crate::graph::Graph;

/// Mean over targets of the shortest-path distance to the closest member of
/// `disease` (the closest-distance metric `d_c`).
///
/// Targets in a component no disease gene reaches are excluded from the
/// mean, not counted as infinite. Returns `None` when either set is empty
/// or no target has a finite distance; a missing value, never 0 or ∞.
///
/// Both index slices are expected pre-filtered to graph membership
/// ([`crate::graph::Network::members`]); duplicate disease entries are
/// harmless.
pub fn closest_distance<G: Graph>(graph: &G, targets: &[usize], disease: &[usize]) -> Option<f64> {
    if targets.is_empty() || disease.is_empty() {
        return None;
    }

    let dist = distances_from_set(graph, disease);

    let mut total = 0.0f64;
    let mut counted = 0usize;
    for &t in targets {
        if let Some(d) = dist[t] {
            total += d as f64;
            counted += 1;
        }
    }

    if counted == 0 {
        None
    } else {
        Some(total / counted as f64)
    }
}

/// BFS distance from the nearest member of `sources` to every node.
///
/// `None` marks nodes in components untouched by any source. Sources score
/// `Some(0)`, including targets that are themselves disease genes.
pub fn distances_from_set<G: Graph>(graph: &G, sources: &[usize]) -> Vec<Option<usize>> {
    let n = graph.node_count();
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut queue: Vec<usize> = Vec::with_capacity(sources.len());

    for &s in sources {
        if dist[s].is_none() {
            dist[s] = Some(0);
            queue.push(s);
        }
    }

    let mut head = 0;
    while head < queue.len() {
        let cur = queue[head];
        head += 1;
        // Queued nodes always carry a distance.
        let d = dist[cur].unwrap() + 1;
        for &nx in graph.neighbors(cur) {
            if dist[nx].is_none() {
                dist[nx] = Some(d);
                queue.push(nx);
            }
        }
    }

    dist
}
