//! Domain model shared across CollabNet services
//!
//! Faculty roster rows, parsed publications, and the directory the network
//! builders consume.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Publication venue class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationKind {
    /// `<article>` records
    Journal,
    /// `<inproceedings>` records
    Conference,
    /// Everything else the bibliography carries
    Other,
}

/// A single publication parsed from a bibliographic record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    /// Publication title
    pub title: String,

    /// Publication year
    pub year: i32,

    /// Venue class
    pub kind: PublicationKind,

    /// Journal or proceedings name, when present
    pub venue: Option<String>,

    /// Normalized author names, owner included
    pub authors: Vec<String>,
}

impl Publication {
    /// Whether the publication appeared in one of the given venues (case-insensitive)
    pub fn venue_in(&self, venues: &[String]) -> bool {
        match &self.venue {
            Some(venue) => venues.iter().any(|v| v.eq_ignore_ascii_case(venue)),
            None => false,
        }
    }
}

/// A faculty roster row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyProfile {
    /// Faculty member name, the primary key across the system
    pub name: String,

    /// Reported gender, when present in the roster
    pub gender: Option<String>,

    /// Academic position (e.g. "Professor", "Lecturer")
    pub position: String,

    /// Whether the member holds a management role
    pub management: bool,

    /// Research area, when present in the roster
    pub area: Option<String>,

    /// Bibliography person identifier used by the fetcher
    pub pid: Option<String>,
}

/// A faculty member with their publication record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyMember {
    pub profile: FacultyProfile,

    /// Parsed publications, unordered
    pub publications: Vec<Publication>,

    /// Whether the member meets the excellence criteria
    pub excellence: bool,
}

impl FacultyMember {
    /// Name shorthand
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Publications dated exactly `year`
    pub fn publications_in(&self, year: i32) -> impl Iterator<Item = &Publication> {
        self.publications.iter().filter(move |p| p.year == year)
    }
}

/// The full faculty directory, ordered by name
///
/// Also used for the candidate pool in the hiring analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacultyDirectory {
    members: BTreeMap<String, FacultyMember>,
}

impl FacultyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member, returning the previous entry under the same name
    pub fn insert(&mut self, member: FacultyMember) -> Option<FacultyMember> {
        self.members.insert(member.profile.name.clone(), member)
    }

    pub fn get(&self, name: &str) -> Option<&FacultyMember> {
        self.members.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member names in roster order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacultyMember> {
        self.members.values()
    }
}

static HOMONYM_SUFFIX: OnceLock<Regex> = OnceLock::new();

/// Normalize an author name as it appears in a bibliographic record
///
/// Collapses internal whitespace and strips the numeric homonym suffix the
/// bibliography appends to disambiguate people ("Jane Doe 0001"), so record
/// authors line up with roster names.
pub fn normalize_author_name(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let re = HOMONYM_SUFFIX.get_or_init(|| Regex::new(r" \d{4}$").expect("valid pattern"));
    re.replace(&collapsed, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str) -> FacultyMember {
        FacultyMember {
            profile: FacultyProfile {
                name: name.to_string(),
                gender: None,
                position: "Professor".to_string(),
                management: false,
                area: None,
                pid: None,
            },
            publications: Vec::new(),
            excellence: false,
        }
    }

    #[test]
    fn test_normalize_author_name() {
        assert_eq!(normalize_author_name("Jane Doe 0001"), "Jane Doe");
        assert_eq!(normalize_author_name("  Jane   Doe "), "Jane Doe");
        // A four-digit token mid-name is not a homonym suffix
        assert_eq!(normalize_author_name("Jane 0001 Doe"), "Jane 0001 Doe");
        // Fewer than four digits is a real name part
        assert_eq!(normalize_author_name("Jane Doe 42"), "Jane Doe 42");
    }

    #[test]
    fn test_directory_ordering() {
        let mut dir = FacultyDirectory::new();
        dir.insert(member("Wei Zhang"));
        dir.insert(member("Alice Tan"));

        let names: Vec<&str> = dir.names().collect();
        assert_eq!(names, vec!["Alice Tan", "Wei Zhang"]);
    }

    #[test]
    fn test_venue_matching() {
        let publication = Publication {
            title: "A result".to_string(),
            year: 2019,
            kind: PublicationKind::Conference,
            venue: Some("NeurIPS".to_string()),
            authors: vec!["Alice Tan".to_string()],
        };

        assert!(publication.venue_in(&["neurips".to_string()]));
        assert!(!publication.venue_in(&["ICML".to_string()]));
    }

    #[test]
    fn test_publications_in_year() {
        let mut m = member("Alice Tan");
        for year in [2018, 2019, 2019] {
            m.publications.push(Publication {
                title: format!("Paper {year}"),
                year,
                kind: PublicationKind::Journal,
                venue: None,
                authors: vec!["Alice Tan".to_string()],
            });
        }

        assert_eq!(m.publications_in(2019).count(), 2);
        assert_eq!(m.publications_in(2020).count(), 0);
    }
}
