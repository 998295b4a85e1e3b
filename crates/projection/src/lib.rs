//! # Projection Crate
//!
//! Deterministic mean/deviation estimates for team scores and player stat
//! lines, plus the injury-aware usage redistribution that feeds them.
//!
//! ## Key Components
//!
//! - **Domain Types**: `TeamRating`, `PlayerRating`, `StatKind`, `InjuryDesignation`
//! - **Model**: `ProjectionModel` turns ratings into `TeamProjection`/`PlayerProjection`
//! - **Usage**: `redistribute_usage` moves a sidelined player's share to teammates
//! - **Store**: `RatingsStore` trait with an in-memory, JSON-loaded implementation
//!
//! ```text
//! RatingsStore ──► ProjectionModel ──► TeamProjection ──► game simulation
//!      │                 ▲
//!      └──► roster ──► redistribute_usage ──► PlayerProjection ──► prop simulation
//! ```
//!
//! ## Invariants
//!
//! - A team's total usage is unchanged by any redistribution pass
//! - A player marked `Out` ends a pass with usage exactly zero
//! - Missing team ratings fall back to the configured default, never an error

pub mod error;
pub mod model;
pub mod player;
pub mod store;
pub mod types;
pub mod usage;

pub use error::{ProjectionError, ProjectionResult};
pub use model::ProjectionModel;
pub use store::{InMemoryRatingsStore, RatingsStore, RosterEntry};
pub use types::{
    InjuryDesignation, InjuryStatus, PlayerProjection, PlayerRating, SituationalFlags, StatKind,
    StatParams, TeamProjection, TeamRating,
};
pub use usage::{
    redistribute_matchup_usage, redistribute_usage, MatchupUsage, UsageAdjustment,
    UsageAllocation,
};
