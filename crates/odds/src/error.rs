//! Odds error types

use thiserror::Error;

/// Errors that can occur during odds conversion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OddsError {
    /// American odds of zero have no payout meaning
    #[error("Invalid American odds: {0}")]
    InvalidOdds(i32),
}
