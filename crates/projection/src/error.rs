//! Error types for the projection crate.

use thiserror::Error;

/// Result type alias for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Errors that can occur while projecting or redistributing usage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// Stat kind outside the supported set.
    #[error("Unsupported stat: {0}")]
    UnsupportedStat(String),

    /// No eligible players to work with.
    #[error("Empty roster: {0}")]
    EmptyRoster(String),

    /// Ratings document could not be read or parsed.
    #[error("Failed to load ratings: {0}")]
    Load(String),
}

impl From<serde_json::Error> for ProjectionError {
    fn from(err: serde_json::Error) -> Self {
        ProjectionError::Load(err.to_string())
    }
}

impl From<std::io::Error> for ProjectionError {
    fn from(err: std::io::Error) -> Self {
        ProjectionError::Load(err.to_string())
    }
}
