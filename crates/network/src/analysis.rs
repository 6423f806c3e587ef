//! Full graph analysis
//!
//! Bundles a graph with its metric report and per-node attributes - the
//! unit the year networks are served as.

use crate::centrality::{
    betweenness_centrality, closeness_centrality, degree_centrality, eigenvector_centrality,
};
use crate::errors::NetworkError;
use crate::graph::CollabGraph;
use crate::layout::spring_layout;
use crate::metrics::{local_clustering, GraphMetrics};
use collabnet_common::config::NetworkConfig;
use serde::{Deserialize, Serialize};

/// Offset added to a node's degree for its display size
const DISPLAY_SIZE_OFFSET: usize = 5;

/// Per-node attribute report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeReport {
    pub name: String,
    pub degree: usize,
    pub degree_centrality: f64,
    pub betweenness: f64,
    pub eigenvector_centrality: f64,
    pub closeness_centrality: f64,
    pub clustering: f64,

    /// Degree-proportional marker size for rendering
    pub display_size: usize,

    /// Spring-layout coordinates
    pub position: [f64; 2],
}

/// A graph with its metric report and node attributes
#[derive(Debug, Clone)]
pub struct AnalyzedGraph {
    pub graph: CollabGraph,
    pub metrics: GraphMetrics,
    pub nodes: Vec<NodeReport>,
}

impl AnalyzedGraph {
    /// Run the full metric set over a graph
    pub fn analyze(graph: CollabGraph, config: &NetworkConfig) -> Result<Self, NetworkError> {
        let metrics = GraphMetrics::compute(&graph, config);

        let degrees = graph.degrees();
        let degree_centralities = degree_centrality(&graph);
        let betweenness = betweenness_centrality(&graph, true);
        let eigenvector = eigenvector_centrality(&graph, config.eigenvector_max_iter)?;
        let closeness = closeness_centrality(&graph);
        let clustering = local_clustering(&graph);
        let positions = spring_layout(&graph, config.layout_scale, config.layout_seed);

        let nodes = (0..graph.node_count())
            .map(|i| NodeReport {
                name: graph.name(i).to_string(),
                degree: degrees[i],
                degree_centrality: degree_centralities[i],
                betweenness: betweenness[i],
                eigenvector_centrality: eigenvector[i],
                closeness_centrality: closeness[i],
                clustering: clustering[i],
                display_size: degrees[i] + DISPLAY_SIZE_OFFSET,
                position: positions[i],
            })
            .collect();

        Ok(Self {
            graph,
            metrics,
            nodes,
        })
    }

    /// Edge list as name pairs
    pub fn edges(&self) -> Vec<(String, String)> {
        self.graph.edge_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_fixture() {
        let mut graph = CollabGraph::with_nodes(["a", "b", "c", "d"]);
        graph.add_edge("a", "b");
        graph.add_edge("b", "c");

        let analyzed = AnalyzedGraph::analyze(graph, &NetworkConfig::default()).unwrap();

        assert_eq!(analyzed.nodes.len(), 4);
        assert_eq!(analyzed.metrics.edge_count, 2);

        let b = analyzed.nodes.iter().find(|n| n.name == "b").unwrap();
        assert_eq!(b.degree, 2);
        assert_eq!(b.display_size, 7);
        assert!(b.betweenness > 0.0);

        let d = analyzed.nodes.iter().find(|n| n.name == "d").unwrap();
        assert_eq!(d.degree, 0);
        assert_eq!(d.display_size, 5);
        assert_eq!(d.closeness_centrality, 0.0);
    }

    #[test]
    fn test_analyze_empty() {
        let analyzed =
            AnalyzedGraph::analyze(CollabGraph::new(), &NetworkConfig::default()).unwrap();
        assert!(analyzed.nodes.is_empty());
        assert!(analyzed.edges().is_empty());
    }
}
