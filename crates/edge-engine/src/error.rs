//! Engine error types

use common::PlayerId;
use odds::OddsError;
use projection::ProjectionError;
use simulation::SimulationError;
use thiserror::Error;

use crate::market::{MarketKind, MarketSide};

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Odds(#[from] OddsError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Player missing from the ratings or from the matchup
    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// Side that does not belong to the market
    #[error("Side {side} is not valid for a {kind} market")]
    SideMismatch { kind: MarketKind, side: MarketSide },

    /// Query routed to the wrong kind of sample set
    #[error("Invalid market query: {0}")]
    InvalidQuery(String),

    /// A sampling task panicked or was cancelled
    #[error("Simulation task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for EngineError {
    fn from(err: tokio::task::JoinError) -> Self {
        EngineError::Task(err.to_string())
    }
}
