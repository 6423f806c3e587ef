//! Faculty roster loading
//!
//! Parses the roster CSV into `FacultyProfile` rows. The roster is the
//! authority on who counts as faculty; record files are matched to it by
//! name.

use crate::errors::IngestionError;
use collabnet_common::model::FacultyProfile;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// One roster CSV row as it appears on disk
#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(alias = "Faculty", alias = "Name")]
    name: String,

    #[serde(default, alias = "Gender")]
    gender: Option<String>,

    #[serde(default, alias = "Position")]
    position: String,

    #[serde(default, alias = "Management")]
    management: Option<String>,

    #[serde(default, alias = "Area")]
    area: Option<String>,

    #[serde(default, alias = "Pid", alias = "PID")]
    pid: Option<String>,
}

impl RosterRow {
    fn into_profile(self, path: &Path) -> Result<FacultyProfile, IngestionError> {
        let management = match self.management.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(flag) if flag.eq_ignore_ascii_case("y") => true,
            Some(flag) if flag.eq_ignore_ascii_case("n") => false,
            Some(flag) => {
                return Err(IngestionError::Roster {
                    path: path.display().to_string(),
                    message: format!("invalid management flag {flag:?} for {}", self.name),
                })
            }
        };

        Ok(FacultyProfile {
            name: self.name.trim().to_string(),
            gender: self.gender.filter(|g| !g.trim().is_empty()),
            position: self.position.trim().to_string(),
            management,
            area: self.area.filter(|a| !a.trim().is_empty()),
            pid: self.pid.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
        })
    }
}

/// Load the roster CSV at `path`
///
/// Duplicate names and empty rosters are errors; the rest of the pipeline
/// keys everything by name.
pub fn load_roster(path: &Path) -> Result<Vec<FacultyProfile>, IngestionError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| IngestionError::Roster {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut seen = HashSet::new();
    let mut profiles = Vec::new();

    for row in reader.deserialize::<RosterRow>() {
        let row = row.map_err(|e| IngestionError::Roster {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let profile = row.into_profile(path)?;
        if profile.name.is_empty() {
            continue;
        }
        if !seen.insert(profile.name.clone()) {
            return Err(IngestionError::DuplicateFaculty(profile.name));
        }

        profiles.push(profile);
    }

    if profiles.is_empty() {
        return Err(IngestionError::EmptyRoster(path.display().to_string()));
    }

    debug!(path = %path.display(), members = profiles.len(), "Roster loaded");

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_roster(contents: &str) -> temppath::TempRoster {
        temppath::TempRoster::new(contents)
    }

    // Minimal on-disk fixture helper; csv::Reader::from_path needs a real file.
    mod temppath {
        use std::io::Write;
        use std::path::PathBuf;

        pub struct TempRoster {
            pub path: PathBuf,
        }

        impl TempRoster {
            pub fn new(contents: &str) -> Self {
                let mut path = std::env::temp_dir();
                path.push(format!(
                    "collabnet-roster-{}-{}.csv",
                    std::process::id(),
                    contents.len()
                ));
                let mut file = std::fs::File::create(&path).unwrap();
                file.write_all(contents.as_bytes()).unwrap();
                Self { path }
            }
        }

        impl Drop for TempRoster {
            fn drop(&mut self) {
                let _ = std::fs::remove_file(&self.path);
            }
        }
    }

    #[test]
    fn test_load_roster() {
        let roster = write_roster(
            "name,gender,position,management,area,pid\n\
             Alice Tan,F,Professor,Y,Data Science,12/345\n\
             Wei Zhang,M,Lecturer,N,Systems,\n",
        );

        let profiles = load_roster(&roster.path).unwrap();
        assert_eq!(profiles.len(), 2);
        assert!(profiles[0].management);
        assert_eq!(profiles[0].pid.as_deref(), Some("12/345"));
        assert!(!profiles[1].management);
        assert_eq!(profiles[1].pid, None);
    }

    #[test]
    fn test_legacy_headers() {
        let roster = write_roster(
            "Faculty,Gender,Position,Management,Area\n\
             Alice Tan,F,Professor,Y,Data Science\n",
        );

        let profiles = load_roster(&roster.path).unwrap();
        assert_eq!(profiles[0].name, "Alice Tan");
        assert_eq!(profiles[0].area.as_deref(), Some("Data Science"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let roster = write_roster(
            "name,position,management\n\
             Alice Tan,Professor,Y\n\
             Alice Tan,Lecturer,N\n",
        );

        let err = load_roster(&roster.path).unwrap_err();
        assert!(matches!(err, IngestionError::DuplicateFaculty(_)));
    }

    #[test]
    fn test_invalid_management_flag() {
        let roster = write_roster(
            "name,position,management\n\
             Alice Tan,Professor,maybe\n",
        );

        let err = load_roster(&roster.path).unwrap_err();
        assert!(matches!(err, IngestionError::Roster { .. }));
    }

    #[test]
    fn test_empty_roster_rejected() {
        let roster = write_roster("name,position,management\n");
        let err = load_roster(&roster.path).unwrap_err();
        assert!(matches!(err, IngestionError::EmptyRoster(_)));
    }
}
