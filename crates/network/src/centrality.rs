//! Node centrality measures
//!
//! Betweenness follows Ulrik Brandes's
//! "A Faster Algorithm for Betweenness Centrality"
//! (http://snap.stanford.edu/class/cs224w-readings/brandes01centrality.pdf),
//! computed across worker threads. Closeness is per-node BFS with
//! Wasserman-Faust component scaling. Eigenvector centrality is power
//! iteration on A + I.

use crate::errors::NetworkError;
use crate::graph::CollabGraph;
use nalgebra::DVector;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread;

const MIN_NUM_THREADS: usize = 1;
const MAX_NUM_THREADS: usize = 32;

/// Degree centrality: degree scaled by n - 1
pub fn degree_centrality(graph: &CollabGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n < 2 {
        return vec![0.0; n];
    }

    let scale = 1.0 / (n - 1) as f64;
    graph.degrees().iter().map(|&d| d as f64 * scale).collect()
}

/// Single-source shortest-path accumulation of Brandes's algorithm
fn betweenness_for_node(index: usize, indices: &[Vec<usize>], betweenness_count: &mut [f64]) {
    let num_nodes = indices.len();

    let mut sigma: Vec<f64> = vec![0.0; num_nodes];
    let mut distance: Vec<usize> = vec![num_nodes + 1; num_nodes];
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut delta: Vec<f64> = vec![0.0; num_nodes];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut stack: Vec<usize> = Vec::new();

    sigma[index] = 1.0;
    distance[index] = 0;
    queue.push_back(index);

    while let Some(v) = queue.pop_front() {
        stack.push(v);

        for &w in &indices[v] {
            if distance[w] == num_nodes + 1 {
                distance[w] = distance[v] + 1;
                queue.push_back(w);
            }
            if distance[w] == distance[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    while let Some(w) = stack.pop() {
        for i in 0..predecessors[w].len() {
            let v = predecessors[w][i];
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != index {
            betweenness_count[w] += delta[w];
        }
    }
}

/// Thread task: grab the next unprocessed source node until none remain,
/// returning this worker's partial counts
fn betweenness_task(counter: Arc<Mutex<usize>>, indices: Arc<Vec<Vec<usize>>>) -> Vec<f64> {
    let num_nodes = indices.len();
    let mut betweenness_count: Vec<f64> = vec![0.0; num_nodes];

    loop {
        let mut guard = counter.lock().expect("betweenness counter poisoned");
        let index: usize = *guard;
        *guard += 1;
        drop(guard);

        if index >= num_nodes {
            break;
        }
        betweenness_for_node(index, &indices, &mut betweenness_count);
    }

    betweenness_count
}

/// Betweenness centrality for every node
pub fn betweenness_centrality(graph: &CollabGraph, normalized: bool) -> Vec<f64> {
    let num_nodes = graph.node_count();
    if num_nodes < 3 {
        return vec![0.0; num_nodes];
    }

    let num_threads = thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(MIN_NUM_THREADS)
        .clamp(MIN_NUM_THREADS, MAX_NUM_THREADS);

    let mut betweenness_count: Vec<f64> = vec![0.0; num_nodes];

    let wrapped_indices = Arc::new(graph.adjacency_lists());
    let wrapped_counter = Arc::new(Mutex::new(0));

    let mut handles = Vec::with_capacity(num_threads);
    for _ in 0..num_threads {
        let counter = Arc::clone(&wrapped_counter);
        let indices = Arc::clone(&wrapped_indices);
        handles.push(thread::spawn(move || betweenness_task(counter, indices)));
    }

    let divisor: f64 = if normalized {
        ((num_nodes - 1) * (num_nodes - 2)) as f64
    } else {
        // non-normalized: every pair is counted from both endpoints
        2.0
    };

    for handle in handles {
        let partial = handle.join().expect("betweenness worker panicked");
        for i in 0..num_nodes {
            betweenness_count[i] += partial[i] / divisor;
        }
    }

    betweenness_count
}

/// Closeness centrality with Wasserman-Faust scaling for disconnected graphs
///
/// For a node reaching `r` others with total distance `s`:
/// `c = (r / s) * (r / (n - 1))`.
pub fn closeness_centrality(graph: &CollabGraph) -> Vec<f64> {
    let num_nodes = graph.node_count();
    if num_nodes < 2 {
        return vec![0.0; num_nodes];
    }

    let indices = graph.adjacency_lists();
    let mut closeness = vec![0.0; num_nodes];

    for index in 0..num_nodes {
        let mut distance: Vec<i64> = vec![-1; num_nodes];
        let mut queue: VecDeque<usize> = VecDeque::new();

        distance[index] = 0;
        queue.push_back(index);

        let mut reachable = 0u64;
        let mut total = 0u64;

        while let Some(v) = queue.pop_front() {
            for &w in &indices[v] {
                if distance[w] == -1 {
                    distance[w] = distance[v] + 1;
                    reachable += 1;
                    total += distance[w] as u64;
                    queue.push_back(w);
                }
            }
        }

        if total > 0 {
            let r = reachable as f64;
            closeness[index] = (r / total as f64) * (r / (num_nodes - 1) as f64);
        }
    }

    closeness
}

/// Eigenvector centrality by power iteration on A + I
///
/// The identity shift keeps the iteration stable on bipartite-ish graphs and
/// converges immediately on edgeless ones. Values are normalized by the
/// euclidean norm.
pub fn eigenvector_centrality(
    graph: &CollabGraph,
    max_iter: usize,
) -> Result<Vec<f64>, NetworkError> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }

    let adjacency = graph.adjacency_matrix();
    let tolerance = 1e-6 * n as f64;

    let mut x = DVector::<f64>::repeat(n, 1.0 / n as f64);

    for _ in 0..max_iter {
        // x' = (A + I) x
        let mut next = &adjacency * &x + &x;

        let norm = next.norm();
        if norm > 0.0 {
            next /= norm;
        }

        let diff: f64 = next.iter().zip(x.iter()).map(|(a, b)| (a - b).abs()).sum();
        x = next;

        if diff < tolerance {
            return Ok(x.iter().copied().collect());
        }
    }

    Err(NetworkError::Convergence {
        iterations: max_iter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Path graph a - b - c
    fn path3() -> CollabGraph {
        let mut graph = CollabGraph::new();
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");
        graph
    }

    /// Star with center "hub" and 4 leaves
    fn star4() -> CollabGraph {
        let mut graph = CollabGraph::new();
        for leaf in ["l1", "l2", "l3", "l4"] {
            graph.add_edge("hub", leaf);
        }
        graph
    }

    #[test]
    fn test_degree_centrality() {
        let graph = star4();
        let dc = degree_centrality(&graph);

        let hub = graph.index_of("hub").unwrap();
        assert!((dc[hub] - 1.0).abs() < 1e-12);
        let leaf = graph.index_of("l1").unwrap();
        assert!((dc[leaf] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_betweenness_path() {
        let graph = path3();
        let bc = betweenness_centrality(&graph, true);

        // Middle node lies on the single a-c shortest path; with n = 3 the
        // normalization divisor is (n-1)(n-2) = 2 and both directions count.
        let b = graph.index_of("b").unwrap();
        assert!((bc[b] - 1.0).abs() < 1e-9);

        let a = graph.index_of("a").unwrap();
        assert!(bc[a].abs() < 1e-9);
    }

    #[test]
    fn test_betweenness_star() {
        let graph = star4();
        let bc = betweenness_centrality(&graph, true);

        let hub = graph.index_of("hub").unwrap();
        assert!((bc[hub] - 1.0).abs() < 1e-9);
        for leaf in ["l1", "l2", "l3", "l4"] {
            assert!(bc[graph.index_of(leaf).unwrap()].abs() < 1e-9);
        }
    }

    #[test]
    fn test_betweenness_tiny_graph() {
        let mut graph = CollabGraph::new();
        graph.add_edge("a", "b");
        assert_eq!(betweenness_centrality(&graph, true), vec![0.0, 0.0]);
    }

    #[test]
    fn test_closeness_path() {
        let graph = path3();
        let cc = closeness_centrality(&graph);

        let b = graph.index_of("b").unwrap();
        let a = graph.index_of("a").unwrap();
        // b reaches both others at distance 1: c = 2/2 * 2/2 = 1
        assert!((cc[b] - 1.0).abs() < 1e-12);
        // a: distances 1 + 2 = 3: c = 2/3
        assert!((cc[a] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_closeness_disconnected() {
        let mut graph = CollabGraph::with_nodes(["a", "b", "c", "d"]);
        graph.add_edge("a", "b");

        let cc = closeness_centrality(&graph);
        let a = graph.index_of("a").unwrap();
        // Reaches 1 of 3 others at distance 1: (1/1) * (1/3)
        assert!((cc[a] - 1.0 / 3.0).abs() < 1e-12);

        let c = graph.index_of("c").unwrap();
        assert_eq!(cc[c], 0.0);
    }

    #[test]
    fn test_eigenvector_star() {
        let graph = star4();
        let ec = eigenvector_centrality(&graph, 600).unwrap();

        let hub = graph.index_of("hub").unwrap();
        let leaf = graph.index_of("l1").unwrap();
        assert!(ec[hub] > ec[leaf]);

        // Leaves are symmetric
        let l2 = graph.index_of("l2").unwrap();
        assert!((ec[leaf] - ec[l2]).abs() < 1e-6);
    }

    #[test]
    fn test_eigenvector_edgeless() {
        let graph = CollabGraph::with_nodes(["a", "b", "c"]);
        let ec = eigenvector_centrality(&graph, 600).unwrap();

        // Uniform vector is already the fixed point
        for value in &ec {
            assert!((value - ec[0]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_eigenvector_empty() {
        let graph = CollabGraph::new();
        assert!(eigenvector_centrality(&graph, 600).unwrap().is_empty());
    }
}
