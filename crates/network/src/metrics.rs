//! Graph-level structural metrics
//!
//! The fixed metric set every collaboration graph is reported with:
//! average degree, clustering, components, path lengths, degree ranking,
//! density, degree assortativity, degree distribution, and small-world
//! coefficients.

use crate::graph::CollabGraph;
use crate::smallworld::small_world_sigmas;
use collabnet_common::config::NetworkConfig;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// A node with its degree, for rankings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreeEntry {
    pub name: String,
    pub degree: usize,
}

/// A degree histogram bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreeBucket {
    pub degree: usize,
    pub count: usize,
}

/// The metric report of one collaboration graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphMetrics {
    pub node_count: usize,
    pub edge_count: usize,

    /// Mean degree over all declared nodes, isolated ones included
    pub average_degree: f64,

    /// Mean local clustering coefficient; degree < 2 contributes 0
    pub average_clustering: f64,

    pub density: f64,

    /// Components with more than one node
    pub component_count: usize,

    /// Member names of every non-trivial component, sorted
    pub components: Vec<Vec<String>>,

    /// Average shortest path length per non-trivial component, descending
    pub component_path_lengths: Vec<f64>,

    /// All nodes ranked by degree, descending (ties by name)
    pub degree_ranking: Vec<DegreeEntry>,

    /// Pearson correlation of degrees across edge endpoints
    pub degree_assortativity: Option<f64>,

    /// Small-world sigma per component with more than 3 nodes, descending
    pub small_world_sigmas: Vec<f64>,

    /// Degree histogram
    pub degree_distribution: Vec<DegreeBucket>,
}

impl GraphMetrics {
    /// Compute the full metric set for a graph
    pub fn compute(graph: &CollabGraph, config: &NetworkConfig) -> Self {
        let n = graph.node_count();
        let degrees = graph.degrees();

        let average_degree = if n == 0 {
            0.0
        } else {
            round2(2.0 * graph.edge_count() as f64 / n as f64)
        };

        let clustering = local_clustering(graph);
        let average_clustering = if n == 0 {
            0.0
        } else {
            round2(clustering.iter().sum::<f64>() / n as f64)
        };

        let all_components = graph.connected_components();
        let nontrivial: Vec<&Vec<usize>> =
            all_components.iter().filter(|c| c.len() > 1).collect();

        let components: Vec<Vec<String>> = nontrivial
            .iter()
            .map(|component| {
                let mut names: Vec<String> = component
                    .iter()
                    .map(|&i| graph.name(i).to_string())
                    .collect();
                names.sort();
                names
            })
            .collect();

        let mut component_path_lengths: Vec<f64> = nontrivial
            .iter()
            .map(|component| round2(average_path_length(graph, component)))
            .collect();
        component_path_lengths.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        let mut degree_ranking: Vec<DegreeEntry> = degrees
            .iter()
            .enumerate()
            .map(|(i, &degree)| DegreeEntry {
                name: graph.name(i).to_string(),
                degree,
            })
            .collect();
        degree_ranking.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.name.cmp(&b.name)));

        let mut histogram: BTreeMap<usize, usize> = BTreeMap::new();
        for &degree in &degrees {
            *histogram.entry(degree).or_default() += 1;
        }
        let degree_distribution = histogram
            .into_iter()
            .map(|(degree, count)| DegreeBucket { degree, count })
            .collect();

        Self {
            node_count: n,
            edge_count: graph.edge_count(),
            average_degree,
            average_clustering,
            density: round2(graph.density()),
            component_count: nontrivial.len(),
            components,
            component_path_lengths,
            degree_ranking,
            degree_assortativity: degree_assortativity(graph),
            small_world_sigmas: small_world_sigmas(graph, config),
            degree_distribution,
        }
    }
}

/// Local clustering coefficient per node, index order
pub fn local_clustering(graph: &CollabGraph) -> Vec<f64> {
    let n = graph.node_count();
    let mut clustering = vec![0.0; n];

    for v in 0..n {
        let neighbors: Vec<usize> = graph.neighbors(v).collect();
        let k = neighbors.len();
        if k < 2 {
            continue;
        }

        let mut triangles = 0usize;
        for (a, &i) in neighbors.iter().enumerate() {
            for &j in neighbors.iter().skip(a + 1) {
                if graph.adjacent(i, j) {
                    triangles += 1;
                }
            }
        }

        clustering[v] = 2.0 * triangles as f64 / (k * (k - 1)) as f64;
    }

    clustering
}

/// Average shortest path length over the ordered pairs of a connected
/// component
pub fn average_path_length(graph: &CollabGraph, component: &[usize]) -> f64 {
    let k = component.len();
    if k < 2 {
        return 0.0;
    }

    let n = graph.node_count();
    let mut total = 0u64;

    for &start in component {
        let mut distance: Vec<i64> = vec![-1; n];
        let mut queue = VecDeque::from([start]);
        distance[start] = 0;

        while let Some(v) = queue.pop_front() {
            for w in graph.neighbors(v) {
                if distance[w] == -1 {
                    distance[w] = distance[v] + 1;
                    total += distance[w] as u64;
                    queue.push_back(w);
                }
            }
        }
    }

    total as f64 / (k * (k - 1)) as f64
}

/// Pearson correlation of degrees at either end of every edge
///
/// `None` when undefined: no edges, or zero degree variance on either side.
pub fn degree_assortativity(graph: &CollabGraph) -> Option<f64> {
    if graph.edge_count() == 0 {
        return None;
    }

    let degrees = graph.degrees();

    // Each undirected edge contributes both orientations, so the two
    // marginals coincide.
    let mut xs: Vec<f64> = Vec::with_capacity(graph.edge_count() * 2);
    let mut ys: Vec<f64> = Vec::with_capacity(graph.edge_count() * 2);
    for (i, j) in graph.edges() {
        xs.push(degrees[i] as f64);
        ys.push(degrees[j] as f64);
        xs.push(degrees[j] as f64);
        ys.push(degrees[i] as f64);
    }

    let m = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / m;
    let mean_y = ys.iter().sum::<f64>() / m;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x) * (x - mean_x);
        var_y += (y - mean_y) * (y - mean_y);
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Round to two decimals for reports
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
