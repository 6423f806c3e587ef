//! Network analysis error types

use collabnet_common::errors::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Eigenvector centrality failed to converge after {iterations} iterations")]
    Convergence { iterations: usize },

    #[error("Unknown faculty member: {0}")]
    UnknownFaculty(String),

    #[error("Invalid year range: {first}-{last}")]
    InvalidYearRange { first: i32, last: i32 },
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        match e {
            NetworkError::Convergence { .. } => AppError::Analysis {
                message: e.to_string(),
            },
            NetworkError::UnknownFaculty(name) => AppError::FacultyNotFound { name },
            NetworkError::InvalidYearRange { .. } => AppError::Configuration {
                message: e.to_string(),
            },
        }
    }
}
