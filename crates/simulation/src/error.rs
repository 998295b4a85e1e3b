//! Error types for the simulation crate.

use thiserror::Error;

/// Result type alias for simulation operations.
pub type SimulationResult<T> = Result<T, SimulationError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Draw count or correlation out of range.
    #[error("Invalid simulation config: {0}")]
    InvalidSimulationConfig(String),

    /// A prop batch left with no active players.
    #[error("Empty roster: nothing to simulate")]
    EmptyRoster,
}
