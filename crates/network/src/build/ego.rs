//! Per-faculty ego networks
//!
//! For one member, per year: the roster graph (co-authorships with other
//! roster members, declared over the whole roster) and the full graph
//! (every co-author, externals included). Nodes carry display roles so the
//! dashboard can color the focus member, roster peers, and externals
//! differently.

use crate::errors::NetworkError;
use crate::graph::CollabGraph;
use collabnet_common::config::NetworkConfig;
use collabnet_common::model::FacultyDirectory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Display role of an ego-network node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// The member the network is built around
    Focus,
    /// A highlighted peer (roster member, or subset member in subset views)
    Member,
    /// Anyone else
    External,
}

/// An ego-network node with its role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EgoNode {
    pub name: String,
    pub role: NodeRole,
}

/// A role-annotated graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EgoGraph {
    pub nodes: Vec<EgoNode>,
    pub edges: Vec<(String, String)>,
}

impl EgoGraph {
    /// Annotate a graph with roles relative to a focus member and a
    /// highlight set
    pub fn from_graph(
        graph: &CollabGraph,
        focus: Option<&str>,
        highlight: &BTreeSet<String>,
    ) -> Self {
        let nodes = graph
            .names()
            .map(|name| EgoNode {
                name: name.to_string(),
                role: if Some(name) == focus {
                    NodeRole::Focus
                } else if highlight.contains(name) {
                    NodeRole::Member
                } else {
                    NodeRole::External
                },
            })
            .collect();

        Self {
            nodes,
            edges: graph.edge_names(),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Collaboration counts of one year
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YearlyCollaborations {
    /// Collaborations with other roster members
    pub roster: usize,
    /// All collaborations, externals included
    pub total: usize,
}

/// One year of a member's ego networks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EgoYear {
    pub roster_graph: EgoGraph,
    pub full_graph: EgoGraph,
    pub counts: YearlyCollaborations,
}

/// A member's ego networks over the covered years
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EgoNetworks {
    pub name: String,
    pub yearly: BTreeMap<i32, EgoYear>,
}

impl EgoNetworks {
    /// Build the ego networks of `name`
    ///
    /// `highlight` controls which non-focus nodes get the `Member` role;
    /// the faculty endpoint passes the whole roster, subset views pass the
    /// subset.
    pub fn build(
        directory: &FacultyDirectory,
        name: &str,
        highlight: &BTreeSet<String>,
        config: &NetworkConfig,
    ) -> Result<Self, NetworkError> {
        let member = directory
            .get(name)
            .ok_or_else(|| NetworkError::UnknownFaculty(name.to_string()))?;

        let mut yearly = BTreeMap::new();

        for year in config.first_year..=config.last_year {
            let mut roster_graph = CollabGraph::with_nodes(directory.names());
            let mut full_graph = CollabGraph::new();
            full_graph.add_node(name);

            for publication in member.publications_in(year) {
                for author in &publication.authors {
                    if author == name {
                        continue;
                    }

                    full_graph.add_edge(name, author);
                    if directory.contains(author) {
                        roster_graph.add_edge(name, author);
                    }
                }
            }

            let counts = YearlyCollaborations {
                roster: roster_graph.edge_count(),
                total: full_graph.edge_count(),
            };

            yearly.insert(
                year,
                EgoYear {
                    roster_graph: EgoGraph::from_graph(&roster_graph, Some(name), highlight),
                    full_graph: EgoGraph::from_graph(&full_graph, Some(name), highlight),
                    counts,
                },
            );
        }

        Ok(Self {
            name: name.to_string(),
            yearly,
        })
    }
}
