//! Small-world coefficients
//!
//! Computes the sigma statistic per connected component:
//! `sigma = (C / C_r) / (L / L_r)` where `C_r` and `L_r` come from random
//! reference graphs with the same degree sequence, produced by
//! connectivity-preserving double edge swaps. Deterministic under the
//! configured seed.

use crate::graph::CollabGraph;
use crate::metrics::{average_path_length, local_clustering};
use collabnet_common::config::NetworkConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Sigma for every component with more than 3 nodes, descending
pub fn small_world_sigmas(graph: &CollabGraph, config: &NetworkConfig) -> Vec<f64> {
    let mut sigmas = Vec::new();

    for component in graph.connected_components() {
        if component.len() <= 3 {
            continue;
        }

        let subgraph = graph.subgraph(&component);
        let mut rng = StdRng::seed_from_u64(config.smallworld_seed);

        if let Some(sigma) = sigma(&subgraph, config.smallworld_niter, config.smallworld_nrand, &mut rng) {
            sigmas.push(crate::metrics::round2(sigma));
        }
    }

    sigmas.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    sigmas
}

/// Sigma of one connected graph
///
/// `None` when the statistic is undefined: a clustering-free graph, or a
/// reference without paths.
pub fn sigma(graph: &CollabGraph, niter: usize, nrand: usize, rng: &mut StdRng) -> Option<f64> {
    let component: Vec<usize> = (0..graph.node_count()).collect();

    let clustering = mean(&local_clustering(graph));
    let path_length = average_path_length(graph, &component);

    let mut reference_clustering = 0.0;
    let mut reference_path_length = 0.0;
    for _ in 0..nrand.max(1) {
        let reference = random_reference(graph, niter, rng);
        reference_clustering += mean(&local_clustering(&reference));
        reference_path_length += average_path_length(&reference, &component);
    }
    reference_clustering /= nrand.max(1) as f64;
    reference_path_length /= nrand.max(1) as f64;

    if reference_clustering <= 0.0 || reference_path_length <= 0.0 || path_length <= 0.0 {
        debug!("Small-world sigma undefined for component");
        return None;
    }

    Some((clustering / reference_clustering) / (path_length / reference_path_length))
}

/// Degree-preserving random reference of a connected graph
///
/// Performs `niter * edge_count` double edge swaps, rejecting any swap that
/// disconnects the graph or would duplicate an edge.
pub fn random_reference(graph: &CollabGraph, niter: usize, rng: &mut StdRng) -> CollabGraph {
    let mut reference = graph.clone();
    let mut edges: Vec<(usize, usize)> = reference.edges().collect();

    if edges.len() < 2 {
        return reference;
    }

    let target_swaps = niter.max(1) * edges.len();
    let max_tries = target_swaps * 10;

    let mut swaps = 0;
    let mut tries = 0;

    while swaps < target_swaps && tries < max_tries {
        tries += 1;

        let x = rng.gen_range(0..edges.len());
        let y = rng.gen_range(0..edges.len());
        if x == y {
            continue;
        }

        let (a, b) = edges[x];
        let (c, d) = edges[y];

        // Proposed rewiring: (a, b), (c, d) -> (a, d), (c, b)
        if a == d || c == b || a == c || b == d {
            continue;
        }
        if reference.adjacent(a, d) || reference.adjacent(c, b) {
            continue;
        }

        reference.remove_edge_by_index(a, b);
        reference.remove_edge_by_index(c, d);
        reference.add_edge_by_index(a, d);
        reference.add_edge_by_index(c, b);

        if reference.is_connected() {
            edges[x] = (a, d);
            edges[y] = (c, b);
            swaps += 1;
        } else {
            // Revert a disconnecting swap
            reference.remove_edge_by_index(a, d);
            reference.remove_edge_by_index(c, b);
            reference.add_edge_by_index(a, b);
            reference.add_edge_by_index(c, d);
        }
    }

    debug!(swaps, tries, "Random reference built");
    reference
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
