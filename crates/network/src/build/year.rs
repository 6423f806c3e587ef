//! Yearly and cumulative collaboration networks
//!
//! For every covered year the series holds two roster-wide graphs: the
//! annual snapshot (pairs collaborating in exactly that year) and the
//! cumulative graph (the running union of pairs since the first covered
//! year). Both are fully analyzed.

use crate::analysis::AnalyzedGraph;
use crate::errors::NetworkError;
use crate::graph::CollabGraph;
use collabnet_common::config::NetworkConfig;
use collabnet_common::metrics::record_graph_build;
use collabnet_common::model::FacultyDirectory;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;
use tracing::{info, instrument};

/// The two analyzed graphs of one year
#[derive(Debug, Clone)]
pub struct YearSnapshot {
    pub year: i32,

    /// Collaborations in exactly this year
    pub annual: AnalyzedGraph,

    /// Collaborations from the first covered year through this one
    pub cumulative: AnalyzedGraph,
}

/// All year snapshots, keyed by year
#[derive(Debug, Clone)]
pub struct YearSeries {
    first_year: i32,
    last_year: i32,
    snapshots: BTreeMap<i32, YearSnapshot>,
}

impl YearSeries {
    /// Build the full series from the directory
    #[instrument(skip(directory, config), fields(members = directory.len()))]
    pub fn build(
        directory: &FacultyDirectory,
        config: &NetworkConfig,
    ) -> Result<Self, NetworkError> {
        if config.first_year > config.last_year {
            return Err(NetworkError::InvalidYearRange {
                first: config.first_year,
                last: config.last_year,
            });
        }

        let start = Instant::now();
        let pairs_by_year = roster_pairs_by_year(directory);

        let mut cumulative_pairs: BTreeSet<(String, String)> = BTreeSet::new();
        let mut snapshots = BTreeMap::new();

        for year in config.first_year..=config.last_year {
            let build_start = Instant::now();

            let mut annual = CollabGraph::with_nodes(directory.names());
            if let Some(pairs) = pairs_by_year.get(&year) {
                for (a, b) in pairs {
                    annual.add_edge(a, b);
                    cumulative_pairs.insert((a.clone(), b.clone()));
                }
            }

            let mut cumulative = CollabGraph::with_nodes(directory.names());
            for (a, b) in &cumulative_pairs {
                cumulative.add_edge(a, b);
            }

            record_graph_build(
                "annual",
                build_start.elapsed().as_secs_f64(),
                annual.node_count(),
                annual.edge_count(),
            );
            record_graph_build(
                "cumulative",
                build_start.elapsed().as_secs_f64(),
                cumulative.node_count(),
                cumulative.edge_count(),
            );

            snapshots.insert(
                year,
                YearSnapshot {
                    year,
                    annual: AnalyzedGraph::analyze(annual, config)?,
                    cumulative: AnalyzedGraph::analyze(cumulative, config)?,
                },
            );
        }

        info!(
            years = snapshots.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Year networks built"
        );

        Ok(Self {
            first_year: config.first_year,
            last_year: config.last_year,
            snapshots,
        })
    }

    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    pub fn last_year(&self) -> i32 {
        self.last_year
    }

    pub fn get(&self, year: i32) -> Option<&YearSnapshot> {
        self.snapshots.get(&year)
    }

    /// Snapshots in year order
    pub fn iter(&self) -> impl Iterator<Item = &YearSnapshot> {
        self.snapshots.values()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Roster co-authorship pairs per publication year
///
/// Every pair appears once per year, endpoints sorted; records from both
/// members resolve to the same pair.
fn roster_pairs_by_year(directory: &FacultyDirectory) -> BTreeMap<i32, BTreeSet<(String, String)>> {
    let mut pairs: BTreeMap<i32, BTreeSet<(String, String)>> = BTreeMap::new();

    for member in directory.iter() {
        for publication in &member.publications {
            for author in &publication.authors {
                if author == member.name() || !directory.contains(author) {
                    continue;
                }

                let pair = if member.name() < author.as_str() {
                    (member.name().to_string(), author.clone())
                } else {
                    (author.clone(), member.name().to_string())
                };
                pairs.entry(publication.year).or_default().insert(pair);
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabnet_common::model::{FacultyMember, FacultyProfile, Publication, PublicationKind};

    fn member(name: &str, papers: Vec<(i32, Vec<&str>)>) -> FacultyMember {
        FacultyMember {
            profile: FacultyProfile {
                name: name.to_string(),
                gender: None,
                position: "Professor".to_string(),
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

    fn directory() -> FacultyDirectory {
        let mut dir = FacultyDirectory::new();
        // a-b collaborate in 2000, a-c in 2001; d never collaborates;
        // an external co-author must not appear in roster graphs.
        dir.insert(member(
            "a",
            vec![
                (2000, vec!["a", "b"]),
                (2001, vec!["a", "c", "External Person"]),
            ],
        ));
        dir.insert(member("b", vec![(2000, vec!["a", "b"])]));
        dir.insert(member("c", vec![(2001, vec!["a", "c", "External Person"])]));
        dir.insert(member("d", vec![]));
        dir
    }

    fn config() -> NetworkConfig {
        NetworkConfig {
            first_year: 2000,
            last_year: 2002,
            ..NetworkConfig::default()
        }
    }

    #[test]
    fn test_annual_and_cumulative_edges() {
        let series = YearSeries::build(&directory(), &config()).unwrap();
        assert_eq!(series.len(), 3);

        let y2000 = series.get(2000).unwrap();
        assert!(y2000.annual.graph.has_edge("a", "b"));
        assert!(!y2000.annual.graph.has_edge("a", "c"));
        assert_eq!(y2000.cumulative.graph.edge_count(), 1);

        let y2001 = series.get(2001).unwrap();
        // The annual graph only carries this year's collaborations
        assert!(y2001.annual.graph.has_edge("a", "c"));
        assert!(!y2001.annual.graph.has_edge("a", "b"));
        // The cumulative graph carries both
        assert!(y2001.cumulative.graph.has_edge("a", "b"));
        assert!(y2001.cumulative.graph.has_edge("a", "c"));

        // A collaboration-free year still yields roster-wide graphs
        let y2002 = series.get(2002).unwrap();
        assert_eq!(y2002.annual.graph.edge_count(), 0);
        assert_eq!(y2002.annual.graph.node_count(), 4);
        assert_eq!(y2002.cumulative.graph.edge_count(), 2);
    }

    #[test]
    fn test_external_authors_excluded() {
        let series = YearSeries::build(&directory(), &config()).unwrap();
        let y2001 = series.get(2001).unwrap();

        assert_eq!(y2001.annual.graph.index_of("External Person"), None);
    }

    #[test]
    fn test_publications_outside_range_ignored() {
        let mut dir = directory();
        dir.insert(member("e", vec![(1999, vec!["e", "a"]), (2003, vec!["e", "a"])]));

        let series = YearSeries::build(&dir, &config()).unwrap();
        let last = series.get(2002).unwrap();
        assert!(!last.cumulative.graph.has_edge("a", "e"));
    }

    #[test]
    fn test_invalid_range_rejected() {
        let config = NetworkConfig {
            first_year: 2010,
            last_year: 2005,
            ..NetworkConfig::default()
        };

        let err = YearSeries::build(&directory(), &config).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidYearRange { .. }));
    }
}
