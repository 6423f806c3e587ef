//! Directory assembly
//!
//! Joins the roster with on-disk record files into a `FacultyDirectory`,
//! computing the excellence flag per member.

use crate::errors::IngestionError;
use crate::fetcher::record_path;
use crate::records::parse_publications_file;
use collabnet_common::config::ExcellenceConfig;
use collabnet_common::metrics::record_ingestion;
use collabnet_common::model::{FacultyDirectory, FacultyMember, FacultyProfile, Publication};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Whether a publication record meets the excellence criteria
///
/// An excellence node has at least `min_papers` publications in the curated
/// venue list dated `since_year` or later.
pub fn is_excellent(publications: &[Publication], config: &ExcellenceConfig) -> bool {
    if config.venues.is_empty() {
        return false;
    }

    let qualifying = publications
        .iter()
        .filter(|p| p.year >= config.since_year && p.venue_in(&config.venues))
        .count();

    qualifying >= config.min_papers
}

/// Assemble the faculty directory from a roster and its record files
///
/// A missing record file degrades to an empty publication list with a
/// warning; the member still appears in every roster-wide graph.
#[instrument(skip(roster, excellence), fields(records_dir = %records_dir.display()))]
pub fn load_directory(
    roster: Vec<FacultyProfile>,
    records_dir: &Path,
    excellence: &ExcellenceConfig,
) -> Result<FacultyDirectory, IngestionError> {
    let mut directory = FacultyDirectory::new();
    let mut parsed_files = 0usize;
    let mut total_publications = 0usize;

    for profile in roster {
        let path = record_path(records_dir, &profile.name);

        let publications = if path.exists() {
            let publications = parse_publications_file(&path)?;
            parsed_files += 1;
            total_publications += publications.len();
            publications
        } else {
            warn!(name = %profile.name, path = %path.display(), "No record file, member has no publications");
            Vec::new()
        };

        let member = FacultyMember {
            excellence: is_excellent(&publications, excellence),
            profile,
            publications,
        };

        let name = member.profile.name.clone();
        if directory.insert(member).is_some() {
            return Err(IngestionError::DuplicateFaculty(name));
        }
    }

    record_ingestion(parsed_files, total_publications);

    info!(
        members = directory.len(),
        records = parsed_files,
        publications = total_publications,
        "Faculty directory loaded"
    );

    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use collabnet_common::model::PublicationKind;

    fn publication(year: i32, venue: Option<&str>) -> Publication {
        Publication {
            title: "A paper".to_string(),
            year,
            kind: PublicationKind::Conference,
            venue: venue.map(str::to_string),
            authors: vec!["Alice Tan".to_string()],
        }
    }

    fn excellence_config() -> ExcellenceConfig {
        ExcellenceConfig {
            venues: vec!["NeurIPS".to_string(), "ICML".to_string()],
            since_year: 2015,
            min_papers: 2,
        }
    }

    #[test]
    fn test_excellence_threshold() {
        let config = excellence_config();

        let below = vec![publication(2019, Some("NeurIPS"))];
        assert!(!is_excellent(&below, &config));

        let at = vec![
            publication(2019, Some("NeurIPS")),
            publication(2020, Some("icml")),
        ];
        assert!(is_excellent(&at, &config));
    }

    #[test]
    fn test_excellence_cutoff_year() {
        let config = excellence_config();

        // Both in top venues, but one predates the cutoff
        let publications = vec![
            publication(2010, Some("NeurIPS")),
            publication(2019, Some("NeurIPS")),
        ];
        assert!(!is_excellent(&publications, &config));
    }

    #[test]
    fn test_excellence_requires_venue_list() {
        let config = ExcellenceConfig {
            venues: Vec::new(),
            since_year: 2015,
            min_papers: 0,
        };

        assert!(!is_excellent(&[publication(2019, Some("NeurIPS"))], &config));
    }

    #[test]
    fn test_missing_record_file_degrades() {
        let dir = std::env::temp_dir().join(format!("collabnet-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let roster = vec![FacultyProfile {
            name: "Alice Tan".to_string(),
            gender: None,
            position: "Professor".to_string(),
            management: false,
            area: None,
            pid: None,
        }];

        let directory = load_directory(roster, &dir, &ExcellenceConfig::default()).unwrap();
        let member = directory.get("Alice Tan").unwrap();
        assert!(member.publications.is_empty());
        assert!(!member.excellence);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
