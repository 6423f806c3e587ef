//! Ingestion error types

use collabnet_common::errors::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Roster error in {path}: {message}")]
    Roster { path: String, message: String },

    #[error("Empty roster: {0}")]
    EmptyRoster(String),

    #[error("Duplicate faculty member: {0}")]
    DuplicateFaculty(String),

    #[error("Record parse error for {path}: {message}")]
    RecordParse { path: String, message: String },

    #[error("Fetch error for {name}: {message}")]
    Fetch { name: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IngestionError> for AppError {
    fn from(e: IngestionError) -> Self {
        match e {
            IngestionError::Roster { .. }
            | IngestionError::EmptyRoster(_)
            | IngestionError::DuplicateFaculty(_) => AppError::Roster {
                message: e.to_string(),
            },
            IngestionError::RecordParse { .. } => AppError::InvalidRecord {
                message: e.to_string(),
            },
            IngestionError::Fetch { .. } => AppError::ServiceUnavailable {
                message: e.to_string(),
            },
            IngestionError::Io(err) => AppError::from(err),
        }
    }
}
