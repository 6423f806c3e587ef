//! Cohort graphs
//!
//! Collaboration graphs of roster slices: management members, holders of a
//! position, and excellence nodes. All years contribute.

use crate::graph::CollabGraph;
use collabnet_common::model::FacultyDirectory;
use std::collections::BTreeSet;

/// A cohort with its collaboration graph
///
/// `members` lists the cohort itself; the graph may pull in other roster
/// members reached by a cohort member's collaborations.
#[derive(Debug, Clone)]
pub struct CohortGraph {
    pub members: Vec<String>,
    pub graph: CollabGraph,
}

impl CohortGraph {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn edges(&self) -> Vec<(String, String)> {
        self.graph.edge_names()
    }
}

/// Management members and their roster collaborations
pub fn management_graph(directory: &FacultyDirectory) -> CohortGraph {
    let members: Vec<String> = directory
        .iter()
        .filter(|m| m.profile.management)
        .map(|m| m.name().to_string())
        .collect();

    let mut graph = CollabGraph::with_nodes(&members);
    for name in &members {
        collect_edges(directory, name, &mut graph, |author| {
            directory.contains(author)
        });
    }

    CohortGraph { members, graph }
}

/// Holders of `position` and their collaborations within the cohort
pub fn position_graph(directory: &FacultyDirectory, position: &str) -> CohortGraph {
    let members: BTreeSet<String> = directory
        .iter()
        .filter(|m| m.profile.position.eq_ignore_ascii_case(position))
        .map(|m| m.name().to_string())
        .collect();

    let mut graph = CollabGraph::with_nodes(&members);
    for name in &members {
        collect_edges(directory, name, &mut graph, |author| {
            members.contains(author)
        });
    }

    CohortGraph {
        members: members.into_iter().collect(),
        graph,
    }
}

/// Excellence nodes and their collaborations within the cohort
pub fn excellence_graph(directory: &FacultyDirectory) -> CohortGraph {
    let members: BTreeSet<String> = directory
        .iter()
        .filter(|m| m.excellence)
        .map(|m| m.name().to_string())
        .collect();

    let mut graph = CollabGraph::with_nodes(&members);
    for name in &members {
        collect_edges(directory, name, &mut graph, |author| {
            members.contains(author)
        });
    }

    CohortGraph {
        members: members.into_iter().collect(),
        graph,
    }
}

/// Add edges from `name` to every co-author accepted by the filter
fn collect_edges<F>(directory: &FacultyDirectory, name: &str, graph: &mut CollabGraph, accept: F)
where
    F: Fn(&str) -> bool,
{
    let Some(member) = directory.get(name) else {
        return;
    };

    for publication in &member.publications {
        for author in &publication.authors {
            if author != name && accept(author) {
                graph.add_edge(name, author);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabnet_common::model::{FacultyMember, FacultyProfile, Publication, PublicationKind};

    fn member(
        name: &str,
        position: &str,
        management: bool,
        excellence: bool,
        coauthors: Vec<&str>,
    ) -> FacultyMember {
        FacultyMember {
            profile: FacultyProfile {
                name: name.to_string(),
                gender: None,
                position: position.to_string(),
                management,
                area: None,
                pid: None,
            },
            publications: coauthors
                .into_iter()
                .map(|other| Publication {
                    title: "Paper".to_string(),
                    year: 2019,
                    kind: PublicationKind::Conference,
                    venue: None,
                    authors: vec![name.to_string(), other.to_string()],
                })
                .collect(),
            excellence,
        }
    }

    fn directory() -> FacultyDirectory {
        let mut dir = FacultyDirectory::new();
        dir.insert(member("a", "Professor", true, true, vec!["b", "Ext"]));
        dir.insert(member("b", "Professor", false, true, vec!["a"]));
        dir.insert(member("c", "Lecturer", true, false, vec!["a"]));
        dir.insert(member("d", "Lecturer", false, false, vec![]));
        dir
    }

    #[test]
    fn test_management_graph() {
        let cohort = management_graph(&directory());

        assert_eq!(cohort.members, vec!["a", "c"]);
        // a-b: edge to a non-management roster member is kept
        assert!(cohort.graph.has_edge("a", "b"));
        assert!(cohort.graph.has_edge("c", "a"));
        // Externals are not
        assert_eq!(cohort.graph.index_of("Ext"), None);
    }

    #[test]
    fn test_position_graph_is_internal() {
        let cohort = position_graph(&directory(), "Lecturer");

        assert_eq!(cohort.members, vec!["c", "d"]);
        // c's only collaboration is with a Professor, outside the cohort
        assert_eq!(cohort.edge_count(), 0);

        let professors = position_graph(&directory(), "professor");
        assert!(professors.graph.has_edge("a", "b"));
    }

    #[test]
    fn test_excellence_graph() {
        let cohort = excellence_graph(&directory());

        assert_eq!(cohort.members, vec!["a", "b"]);
        assert!(cohort.graph.has_edge("a", "b"));
        assert_eq!(cohort.edge_count(), 1);
    }
}
