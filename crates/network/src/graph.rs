//! Collaboration graph representation
//!
//! Provides the in-memory undirected graph all network builders share.
//! Nodes are interned author names; edges are simple (no self-loops, no
//! parallel edges). Isolated nodes are first-class: roster-wide graphs
//! declare every faculty member whether or not they collaborated.

use nalgebra::DMatrix;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// An undirected simple graph over interned author names
#[derive(Debug, Clone, Default)]
pub struct CollabGraph {
    /// Node index -> name
    names: Vec<String>,

    /// Name -> node index
    index: HashMap<String, usize>,

    /// Neighbor sets, kept sorted for deterministic iteration
    adjacency: Vec<BTreeSet<usize>>,

    edge_count: usize,
}

impl CollabGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with the given node set and no edges
    pub fn with_nodes<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = Self::new();
        for name in names {
            graph.add_node(name.as_ref());
        }
        graph
    }

    /// Intern a node, returning its index
    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }

        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        self.adjacency.push(BTreeSet::new());
        i
    }

    /// Insert an undirected edge, interning endpoints as needed
    ///
    /// Self-loops are ignored. Returns whether the edge was new.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }

        let i = self.add_node(a);
        let j = self.add_node(b);
        self.add_edge_by_index(i, j)
    }

    /// Insert an undirected edge between existing nodes
    pub fn add_edge_by_index(&mut self, i: usize, j: usize) -> bool {
        if i == j {
            return false;
        }

        let inserted = self.adjacency[i].insert(j);
        if inserted {
            self.adjacency[j].insert(i);
            self.edge_count += 1;
        }
        inserted
    }

    /// Remove an undirected edge between node indices
    ///
    /// Returns whether the edge was present.
    pub fn remove_edge_by_index(&mut self, i: usize, j: usize) -> bool {
        let removed = self.adjacency[i].remove(&j);
        if removed {
            self.adjacency[j].remove(&i);
            self.edge_count -= 1;
        }
        removed
    }

    /// Checks if the graph contains an edge
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&i), Some(&j)) => self.adjacency[i].contains(&j),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of a node index
    pub fn name(&self, i: usize) -> &str {
        &self.names[i]
    }

    /// Node index of a name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// All node names in index order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Degree of a node index
    pub fn degree(&self, i: usize) -> usize {
        self.adjacency[i].len()
    }

    /// Degrees in index order
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(BTreeSet::len).collect()
    }

    /// Neighbors of a node index, ascending
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[i].iter().copied()
    }

    /// Whether two node indices are adjacent
    pub fn adjacent(&self, i: usize, j: usize) -> bool {
        self.adjacency[i].contains(&j)
    }

    /// Edges as `(i, j)` index pairs with `i < j`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, nbrs)| nbrs.iter().filter(move |&&j| i < j).map(move |&j| (i, j)))
    }

    /// Edges as name pairs
    pub fn edge_names(&self) -> Vec<(String, String)> {
        self.edges()
            .map(|(i, j)| (self.names[i].clone(), self.names[j].clone()))
            .collect()
    }

    /// Adjacency lists in index order, for the centrality routines
    pub fn adjacency_lists(&self) -> Vec<Vec<usize>> {
        self.adjacency
            .iter()
            .map(|nbrs| nbrs.iter().copied().collect())
            .collect()
    }

    /// Computes the density of the graph, the ratio of edges with respect to
    /// the maximum possible edges over the declared node set
    pub fn density(&self) -> f64 {
        let n = self.node_count() as f64;
        if n < 2.0 {
            return 0.0;
        }

        let possible = n * (n - 1.0) / 2.0;
        self.edge_count as f64 / possible
    }

    /// Connected components as sorted index lists, largest first
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let n = self.node_count();
        let mut seen = vec![false; n];
        let mut components = Vec::new();

        for start in 0..n {
            if seen[start] {
                continue;
            }

            let mut component = Vec::new();
            let mut queue = VecDeque::from([start]);
            seen[start] = true;

            while let Some(v) = queue.pop_front() {
                component.push(v);
                for w in self.neighbors(v) {
                    if !seen[w] {
                        seen[w] = true;
                        queue.push_back(w);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }

        components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        components
    }

    /// Whether the graph is connected (trivially true for n <= 1)
    pub fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }

    /// Induced subgraph on the given node indices
    pub fn subgraph(&self, nodes: &[usize]) -> CollabGraph {
        let keep: BTreeSet<usize> = nodes.iter().copied().collect();
        let mut sub = CollabGraph::new();

        for &i in &keep {
            sub.add_node(&self.names[i]);
        }
        for &i in &keep {
            for j in self.neighbors(i) {
                if i < j && keep.contains(&j) {
                    sub.add_edge(&self.names[i], &self.names[j]);
                }
            }
        }

        sub
    }

    /// Constructs the adjacency matrix for this graph
    ///
    /// The matrix is symmetric since the graph is undirected; rows follow
    /// node index order.
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.node_count();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        for (i, j) in self.edges() {
            matrix[(i, j)] = 1.0;
            matrix[(j, i)] = 1.0;
        }

        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_construction() {
        let mut graph = CollabGraph::new();

        graph.add_edge("a", "b");
        graph.add_edge("b", "c");

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge("a", "b"));
        assert!(graph.has_edge("b", "a"));
        assert!(!graph.has_edge("a", "c"));
    }

    #[test]
    fn test_duplicate_and_self_edges() {
        let mut graph = CollabGraph::new();

        assert!(graph.add_edge("a", "b"));
        assert!(!graph.add_edge("b", "a"));
        assert!(!graph.add_edge("a", "a"));

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_isolated_nodes_count() {
        let mut graph = CollabGraph::with_nodes(["a", "b", "c", "d"]);
        graph.add_edge("a", "b");

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.degree(graph.index_of("c").unwrap()), 0);
    }

    #[test]
    fn test_density() {
        let mut graph = CollabGraph::new();
        assert_eq!(graph.density(), 0.0);

        graph.add_edge("a", "b");
        assert_eq!(graph.density(), 1.0);

        graph.add_node("c");
        assert!((graph.density() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_connected_components() {
        let mut graph = CollabGraph::with_nodes(["a", "b", "c", "d", "e"]);
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("d", "e");

        let components = graph.connected_components();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].len(), 3);
        assert_eq!(components[1].len(), 2);
    }

    #[test]
    fn test_subgraph() {
        let mut graph = CollabGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph.add_edge("a", "c");
        graph.add_edge("c", "d");

        let keep: Vec<usize> = ["a", "b", "c"]
            .iter()
            .map(|n| graph.index_of(n).unwrap())
            .collect();
        let sub = graph.subgraph(&keep);

        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 3);
        assert!(!sub.has_edge("c", "d"));
    }

    #[test]
    fn test_adjacency_matrix() {
        let mut graph = CollabGraph::new();
        graph.add_edge("a", "b");

        let m = graph.adjacency_matrix();
        assert_eq!(m[(0, 1)], 1.0);
        assert_eq!(m[(1, 0)], 1.0);
        assert_eq!(m[(0, 0)], 0.0);
    }
}
