//! Hiring analysis
//!
//! Ranks well-connected external researchers from the candidate pool:
//! build the author-level collaboration graph over the hiring window, keep
//! the top-degree names not already on the faculty roster, and report the
//! induced subgraph on that shortlist.

use crate::graph::CollabGraph;
use collabnet_common::config::HireConfig;
use collabnet_common::metrics::record_graph_build;
use collabnet_common::model::FacultyDirectory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{info, instrument};

/// A shortlisted researcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HireCandidate {
    pub name: String,

    /// Degree in the full window graph (the ranking basis)
    pub window_degree: usize,

    /// Degree within the shortlist's induced subgraph
    pub shortlist_degree: usize,
}

/// The hiring shortlist and its collaboration structure
#[derive(Debug, Clone)]
pub struct HireAnalysis {
    pub from_year: i32,
    pub to_year: i32,
    pub shortlist: Vec<HireCandidate>,

    /// Induced subgraph on the shortlist
    pub graph: CollabGraph,
}

impl HireAnalysis {
    /// Build the analysis from the candidate pool
    ///
    /// `faculty_names` is excluded from the shortlist: the point is finding
    /// people not already on the roster.
    #[instrument(skip(pool, faculty_names, config), fields(candidates = pool.len()))]
    pub fn build(
        pool: &FacultyDirectory,
        faculty_names: &BTreeSet<String>,
        config: &HireConfig,
    ) -> Self {
        let start = Instant::now();

        // Author-level collaboration graph over the window, externals and
        // all
        let mut window = CollabGraph::new();
        for candidate in pool.iter() {
            for publication in &candidate.publications {
                if publication.year < config.from_year || publication.year > config.to_year {
                    continue;
                }
                for author in &publication.authors {
                    if author != candidate.name() {
                        window.add_edge(candidate.name(), author);
                    }
                }
            }
        }

        record_graph_build(
            "hire_window",
            start.elapsed().as_secs_f64(),
            window.node_count(),
            window.edge_count(),
        );

        // Rank by degree, drop anyone already on the faculty roster
        let mut ranked: Vec<(usize, usize)> = window.degrees().into_iter().enumerate().collect();
        ranked.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| window.name(a.0).cmp(window.name(b.0)))
        });

        let shortlist_indices: Vec<usize> = ranked
            .iter()
            .filter(|(i, _)| !faculty_names.contains(window.name(*i)))
            .take(config.pool_size)
            .map(|&(i, _)| i)
            .collect();

        let graph = window.subgraph(&shortlist_indices);

        let shortlist = shortlist_indices
            .iter()
            .map(|&i| {
                let name = window.name(i).to_string();
                let shortlist_degree = graph
                    .index_of(&name)
                    .map(|j| graph.degree(j))
                    .unwrap_or_default();
                HireCandidate {
                    window_degree: window.degree(i),
                    shortlist_degree,
                    name,
                }
            })
            .collect();

        info!(
            window_nodes = window.node_count(),
            window_edges = window.edge_count(),
            shortlist = shortlist_indices.len(),
            "Hiring analysis built"
        );

        Self {
            from_year: config.from_year,
            to_year: config.to_year,
            shortlist,
            graph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabnet_common::model::{FacultyMember, FacultyProfile, Publication, PublicationKind};

    fn candidate(name: &str, papers: Vec<(i32, Vec<&str>)>) -> FacultyMember {
        FacultyMember {
            profile: FacultyProfile {
                name: name.to_string(),
                gender: None,
                position: "Researcher".to_string(),
                management: false,
                area: None,
                pid: None,
            },
            publications: papers
                .into_iter()
                .map(|(year, authors)| Publication {
                    title: format!("Paper {year}"),
                    year,
                    kind: PublicationKind::Conference,
                    venue: None,
                    authors: authors.into_iter().map(str::to_string).collect(),
                })
                .collect(),
            excellence: false,
        }
    }

    fn pool() -> FacultyDirectory {
        let mut pool = FacultyDirectory::new();
        // x collaborates widely inside the window; y only outside it
        pool.insert(candidate(
            "x",
            vec![
                (2018, vec!["x", "p", "q"]),
                (2019, vec!["x", "r"]),
                (2019, vec!["x", "On Roster"]),
            ],
        ));
        pool.insert(candidate("y", vec![(2016, vec!["y", "z"])]));
        pool
    }

    fn config(pool_size: usize) -> HireConfig {
        HireConfig {
            from_year: 2018,
            to_year: 2020,
            pool_size,
        }
    }

    #[test]
    fn test_window_filtering() {
        let faculty = BTreeSet::new();
        let analysis = HireAnalysis::build(&pool(), &faculty, &config(100));

        // y's 2016 paper is outside the window
        let names: Vec<&str> = analysis.shortlist.iter().map(|c| c.name.as_str()).collect();
        assert!(!names.contains(&"y"));
        assert!(!names.contains(&"z"));
        assert!(names.contains(&"x"));
    }

    #[test]
    fn test_roster_members_excluded() {
        let faculty: BTreeSet<String> = ["On Roster".to_string()].into_iter().collect();
        let analysis = HireAnalysis::build(&pool(), &faculty, &config(100));

        let names: Vec<&str> = analysis.shortlist.iter().map(|c| c.name.as_str()).collect();
        assert!(!names.contains(&"On Roster"));
        // x keeps the roster collaboration in its window degree
        let x = analysis.shortlist.iter().find(|c| c.name == "x").unwrap();
        assert_eq!(x.window_degree, 4);
    }

    #[test]
    fn test_ranking_and_pool_size() {
        let faculty = BTreeSet::new();
        let analysis = HireAnalysis::build(&pool(), &faculty, &config(2));

        assert_eq!(analysis.shortlist.len(), 2);
        // x has the highest window degree
        assert_eq!(analysis.shortlist[0].name, "x");
        assert!(analysis.shortlist[0].window_degree >= analysis.shortlist[1].window_degree);
    }

    #[test]
    fn test_induced_subgraph_degrees() {
        let faculty = BTreeSet::new();
        let analysis = HireAnalysis::build(&pool(), &faculty, &config(100));

        // Within the shortlist, x is connected to its window co-authors
        let x = analysis.shortlist.iter().find(|c| c.name == "x").unwrap();
        assert_eq!(x.shortlist_degree, x.window_degree);

        // p and q were on the same paper but never co-authored directly
        assert!(!analysis.graph.has_edge("p", "q"));
    }
}
