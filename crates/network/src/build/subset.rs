//! Faculty subset networks
//!
//! Given a set of roster names, builds the per-year collaboration graphs of
//! the subset against the whole roster, plus each member's ego networks.

use crate::build::ego::{EgoGraph, EgoNetworks};
use crate::errors::NetworkError;
use crate::graph::CollabGraph;
use collabnet_common::config::NetworkConfig;
use collabnet_common::model::FacultyDirectory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One year of a subset's collaborations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsetYear {
    pub graph: EgoGraph,

    /// Edges from subset members to roster co-authors this year
    pub collaboration_count: usize,
}

/// A subset's networks over the covered years
#[derive(Debug, Clone)]
pub struct SubsetNetworks {
    pub names: Vec<String>,
    pub yearly: BTreeMap<i32, SubsetYear>,
    pub members: BTreeMap<String, EgoNetworks>,
}

impl SubsetNetworks {
    /// Build the subset networks
    ///
    /// Every requested name must be on the roster.
    pub fn build(
        directory: &FacultyDirectory,
        names: &[String],
        config: &NetworkConfig,
    ) -> Result<Self, NetworkError> {
        for name in names {
            if !directory.contains(name) {
                return Err(NetworkError::UnknownFaculty(name.clone()));
            }
        }

        let highlight: BTreeSet<String> = names.iter().cloned().collect();

        let mut yearly = BTreeMap::new();
        for year in config.first_year..=config.last_year {
            let mut graph = CollabGraph::with_nodes(directory.names());

            for name in &highlight {
                // Checked above
                let member = directory
                    .get(name)
                    .ok_or_else(|| NetworkError::UnknownFaculty(name.clone()))?;

                for publication in member.publications_in(year) {
                    for author in &publication.authors {
                        if author != name && directory.contains(author) {
                            graph.add_edge(name, author);
                        }
                    }
                }
            }

            let collaboration_count = graph.edge_count();
            yearly.insert(
                year,
                SubsetYear {
                    graph: EgoGraph::from_graph(&graph, None, &highlight),
                    collaboration_count,
                },
            );
        }

        let mut members = BTreeMap::new();
        for name in &highlight {
            members.insert(
                name.clone(),
                EgoNetworks::build(directory, name, &highlight, config)?,
            );
        }

        Ok(Self {
            names: highlight.into_iter().collect(),
            yearly,
            members,
        })
    }
}
