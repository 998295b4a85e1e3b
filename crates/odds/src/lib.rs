//! Odds arithmetic for HoopsEdge
//!
//! This crate turns sportsbook prices into probabilities and compares
//! them against simulated probabilities.
//!
//! # Core Components
//!
//! - [`conversion`] - American/decimal odds, implied probability, expected value
//! - [`edge`] - Edge evaluation of a simulated probability against a price
//!
//! # Key Invariants
//!
//! - Every function is pure and deterministic
//! - American odds of zero are rejected, every other integer is a valid price
//! - Implied probability of a valid price lies strictly inside (0, 1)

pub mod conversion;
pub mod edge;
pub mod error;

pub use conversion::{
    american_profit, decimal_odds, expected_value, fair_american_odds, implied_probability,
};
pub use edge::{evaluate_edge, EdgeResult};
pub use error::OddsError;

pub type Result<T> = std::result::Result<T, OddsError>;
