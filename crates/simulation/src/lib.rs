//! # Simulation Crate
//!
//! Monte Carlo estimators for game markets and player props.
//!
//! ## Key Components
//!
//! - **Config**: `SimulationConfig` carries draw count, score correlation and seed
//! - **Game**: `simulate_game` draws correlated home/away scores into a `GameSampleSet`
//! - **Prop**: `simulate_prop` draws independent stat samples into a `PropSampleSet`
//!
//! Every call owns its generator. A seeded config reproduces the same draws;
//! an unseeded one pulls from entropy.
//!
//! ## Invariants
//!
//! - Each side of a market and its complement are read from the same draws,
//!   so they sum to exactly one
//! - An invalid config is rejected before any sampling happens

pub mod error;
pub mod game;
pub mod params;
pub mod prop;

pub use error::{SimulationError, SimulationResult};
pub use game::{simulate_game, GameSampleSet};
pub use params::SimulationConfig;
pub use prop::{simulate_prop, PropSampleSet};
