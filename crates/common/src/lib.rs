//! Common types and utilities for HoopsEdge
//!
//! This crate provides shared types and error definitions used across
//! all HoopsEdge crates.
//!
//! # Modules
//!
//! - [`error`] - Common error types
//! - [`types`] - Shared domain types (TeamId, PlayerId, Matchup, etc.)

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
