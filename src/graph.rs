//! Graph topology seam and the concrete string-labeled network.
//!
//! The numerical engines (transition matrix, RWR, proximity, null models)
//! only ever see node *indices* through the [`Graph`] trait. Label handling
//! (gene/protein symbols, membership filtering, LCC extraction) lives in
//! [`Network`], so upstream column-naming quirks never reach the engines.

use std::collections::HashMap;

/// Read-only topology over `0..node_count()` node indices.
///
/// Neighbor slices are borrowed and sorted ascending; implementations must
/// not expose self-loops or duplicate edges.
pub trait Graph {
    fn node_count(&self) -> usize;
    fn neighbors(&self, node: usize) -> &[usize];
    fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }
}

/// Undirected, unweighted, simple graph over string node labels.
///
/// Construction drops self-loops and deduplicates parallel edges, so
/// `degree` is always the count of distinct neighbors.
#[derive(Debug, Clone)]
pub struct Network {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    adj: Vec<Vec<usize>>,
}

impl Network {
    /// Build from an undirected edge list of label pairs.
    ///
    /// Self-loop edges are skipped; repeated edges collapse to one.
    /// Endpoint order within a pair is irrelevant.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut net = Self {
            labels: Vec::new(),
            index: HashMap::new(),
            adj: Vec::new(),
        };

        for (a, b) in edges {
            let u = net.intern(a.as_ref());
            let v = net.intern(b.as_ref());
            if u == v {
                continue;
            }
            net.adj[u].push(v);
            net.adj[v].push(u);
        }

        for nbrs in &mut net.adj {
            nbrs.sort_unstable();
            nbrs.dedup();
        }

        net
    }

    fn intern(&mut self, label: &str) -> usize {
        if let Some(&i) = self.index.get(label) {
            return i;
        }
        let i = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), i);
        self.adj.push(Vec::new());
        i
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn label(&self, node: usize) -> &str {
        &self.labels[node]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Filter a label set to the nodes actually present in the graph.
    ///
    /// Absent labels carry no information for influence/proximity and are
    /// dropped (not treated as zero-score nodes). Order follows the input;
    /// duplicates collapse to the first occurrence.
    pub fn members<S: AsRef<str>>(&self, labels: &[S]) -> Vec<usize> {
        let mut seen = vec![false; self.labels.len()];
        let mut out = Vec::with_capacity(labels.len());
        for l in labels {
            if let Some(i) = self.index_of(l.as_ref()) {
                if !seen[i] {
                    seen[i] = true;
                    out.push(i);
                }
            }
        }
        out
    }

    /// Subgraph induced by a label set. Kept nodes that lose all their
    /// edges stay in the subgraph as isolated nodes.
    pub fn filter_to_labels<S: AsRef<str>>(&self, keep: &[S]) -> Network {
        let mut kept = vec![false; self.labels.len()];
        for l in keep {
            if let Some(i) = self.index_of(l.as_ref()) {
                kept[i] = true;
            }
        }
        self.induced(&kept)
    }

    /// Subgraph over the marked nodes, with indices remapped densely.
    fn induced(&self, kept: &[bool]) -> Network {
        let mut remap = vec![usize::MAX; self.labels.len()];
        let mut net = Self {
            labels: Vec::new(),
            index: HashMap::new(),
            adj: Vec::new(),
        };
        for u in 0..self.labels.len() {
            if kept[u] {
                remap[u] = net.intern(&self.labels[u]);
            }
        }
        for u in 0..self.labels.len() {
            if !kept[u] {
                continue;
            }
            for &v in &self.adj[u] {
                if kept[v] {
                    net.adj[remap[u]].push(remap[v]);
                }
            }
        }
        // Old neighbor order was sorted and the remap is monotone, so the
        // new lists are already sorted and duplicate-free.
        net
    }

    /// Largest connected component as a new `Network`.
    ///
    /// Proximity and diffusion assume a connected input; callers apply this
    /// after upstream filtering. Ties break toward the component discovered
    /// first, which is deterministic for a given construction order.
    pub fn largest_connected_component(&self) -> Network {
        let n = self.labels.len();
        let mut comp = vec![usize::MAX; n];
        let mut best: (usize, usize) = (0, 0); // (size, component id)
        let mut n_comps = 0usize;
        let mut queue: Vec<usize> = Vec::new();

        for start in 0..n {
            if comp[start] != usize::MAX {
                continue;
            }
            let id = n_comps;
            n_comps += 1;
            comp[start] = id;
            queue.clear();
            queue.push(start);
            let mut head = 0;
            let mut size = 1usize;
            while head < queue.len() {
                let cur = queue[head];
                head += 1;
                for &nx in &self.adj[cur] {
                    if comp[nx] == usize::MAX {
                        comp[nx] = id;
                        queue.push(nx);
                        size += 1;
                    }
                }
            }
            if size > best.0 {
                best = (size, id);
            }
        }

        let kept: Vec<bool> = comp.iter().map(|&c| c == best.1).collect();
        self.induced(&kept)
    }

    /// Whether every node is reachable from every other (vacuously true for
    /// empty and single-node graphs).
    pub fn is_connected(&self) -> bool {
        let n = self.labels.len();
        if n <= 1 {
            return true;
        }
        let mut seen = vec![false; n];
        let mut queue = vec![0usize];
        seen[0] = true;
        let mut head = 0;
        let mut count = 1usize;
        while head < queue.len() {
            let cur = queue[head];
            head += 1;
            for &nx in &self.adj[cur] {
                if !seen[nx] {
                    seen[nx] = true;
                    queue.push(nx);
                    count += 1;
                }
            }
        }
        count == n
    }
}

impl Graph for Network {
    fn node_count(&self) -> usize {
        self.labels.len()
    }

    fn neighbors(&self, node: usize) -> &[usize] {
        self.adj.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Plain adjacency-list topology for index-only callers and tests.
#[derive(Debug, Clone)]
pub struct AdjList {
    pub adj: Vec<Vec<usize>>,
}

impl AdjList {
    pub fn new(mut adj: Vec<Vec<usize>>) -> Self {
        for (i, nbrs) in adj.iter_mut().enumerate() {
            nbrs.retain(|&v| v != i);
            nbrs.sort_unstable();
            nbrs.dedup();
        }
        Self { adj }
    }
}

impl Graph for AdjList {
    fn node_count(&self) -> usize {
        self.adj.len()
    }

    fn neighbors(&self, node: usize) -> &[usize] {
        self.adj.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_loops_and_duplicate_edges_are_dropped() {
        let g = Network::from_edges(vec![("A", "B"), ("B", "A"), ("A", "A"), ("B", "C")]);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        let a = g.index_of("A").unwrap();
        assert_eq!(g.degree(a), 1);
    }

    #[test]
    fn adjlist_drops_self_loops_and_duplicates() {
        let g = AdjList::new(vec![vec![0, 1, 1], vec![0, 1]]);
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0]);
    }

    #[test]
    fn members_filters_and_dedups() {
        let g = Network::from_edges(vec![("A", "B"), ("B", "C")]);
        let m = g.members(&["C", "Z", "A", "C"]);
        assert_eq!(m.len(), 2);
        assert_eq!(g.label(m[0]), "C");
        assert_eq!(g.label(m[1]), "A");
    }

    #[test]
    fn lcc_picks_the_larger_component() {
        let g = Network::from_edges(vec![("A", "B"), ("B", "C"), ("X", "Y")]);
        let lcc = g.largest_connected_component();
        assert_eq!(lcc.node_count(), 3);
        assert!(lcc.contains("A") && lcc.contains("C"));
        assert!(!lcc.contains("X"));
        assert!(lcc.is_connected());
        assert!(!g.is_connected());
    }

    #[test]
    fn filter_to_labels_induces_subgraph() {
        let g = Network::from_edges(vec![("A", "B"), ("B", "C"), ("C", "D")]);
        let sub = g.filter_to_labels(&["A", "B", "C"]);
        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 2);
        assert!(!sub.contains("D"));
    }
}
