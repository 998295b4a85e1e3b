//! # Edge Engine
//!
//! Ties ratings lookup, projection, usage redistribution, simulation and
//! edge evaluation into per-matchup operations.
//!
//! ```text
//! RatingsStore ─► project_matchup ─► simulate ─► MarketQuery ─► EdgeResult
//!      │
//!      └─► roster ─► redistribute usage ─► project players ─► simulate props (parallel)
//! ```
//!
//! - [`EdgeEngine::evaluate_game`] prices game markets from a single draw set
//! - [`EdgeEngine::evaluate_roster_props`] prices one stat for every active player
//! - [`EdgeEngine::evaluate_player_prop`] prices one side of one player's line

pub mod engine;
pub mod error;
pub mod market;
pub mod report;

pub use engine::EdgeEngine;
pub use error::{EngineError, EngineResult};
pub use market::{BothSides, MarketEvaluation, MarketKind, MarketQuery, MarketSide};
pub use report::{
    suggested_prop_line, GameContext, GameReport, MatchupProjection, PropEvaluation, PropRequest,
    RosterPropsReport,
};
