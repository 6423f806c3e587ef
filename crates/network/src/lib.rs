//! CollabNet Network
//!
//! Collaboration-graph construction and structural metrics:
//! - the shared undirected graph type
//! - graph-level metrics (degree, clustering, components, density,
//!   assortativity, small-world coefficients)
//! - node-level metrics (centralities, clustering, layout positions)
//! - the builders: year series, ego networks, subsets, cohorts, and the
//!   hiring analysis

pub mod analysis;
pub mod build;
pub mod centrality;
pub mod errors;
pub mod graph;
pub mod layout;
pub mod metrics;
pub mod smallworld;

pub use analysis::{AnalyzedGraph, NodeReport};
pub use build::{
    excellence_graph, management_graph, position_graph, CohortGraph, EgoGraph, EgoNetworks,
    EgoNode, EgoYear, HireAnalysis, HireCandidate, NodeRole, SubsetNetworks, SubsetYear,
    YearSeries, YearSnapshot, YearlyCollaborations,
};
pub use errors::NetworkError;
pub use graph::CollabGraph;
pub use metrics::{DegreeBucket, DegreeEntry, GraphMetrics};
