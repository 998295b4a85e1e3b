//! Common error types for HoopsEdge

use thiserror::Error;

/// Errors raised by the shared domain types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A game string that is not `Away @ Home`
    #[error("Invalid matchup: {0}")]
    InvalidMatchup(String),
}

/// Result type alias using the common Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_matchup(msg: impl Into<String>) -> Self {
        Self::InvalidMatchup(msg.into())
    }
}
