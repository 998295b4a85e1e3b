//! Edge evaluation
//!
//! Compares a simulated probability for one side of a market against the
//! price offered for that side.

use serde::{Deserialize, Serialize};

use crate::conversion::{decimal_odds, expected_value, implied_probability};
use crate::Result;

/// Result of pricing one side of a market
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeResult {
    /// Simulated probability that the side wins
    pub probability: f64,
    /// Break-even probability of the offered price
    pub implied_probability: f64,
    /// `probability - implied_probability`
    pub edge: f64,
    /// Expected profit per unit staked
    pub expected_value: f64,
}

impl EdgeResult {
    /// True when the simulated probability beats the price
    pub fn is_positive(&self) -> bool {
        self.expected_value > 0.0
    }
}

/// Evaluate a simulated probability against an American price
pub fn evaluate_edge(probability: f64, american: i32) -> Result<EdgeResult> {
    let implied = implied_probability(decimal_odds(american)?);
    let ev = expected_value(probability, american)?;

    Ok(EdgeResult {
        probability,
        implied_probability: implied,
        edge: probability - implied,
        expected_value: ev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OddsError;
    use assert_matches::assert_matches;

    #[test]
    fn test_positive_edge() {
        let result = evaluate_edge(0.56, -110).unwrap();
        assert!((result.implied_probability - 0.5238).abs() < 1e-4);
        assert!((result.edge - (0.56 - result.implied_probability)).abs() < 1e-12);
        assert!(result.is_positive());
    }

    #[test]
    fn test_negative_edge() {
        let result = evaluate_edge(0.45, -110).unwrap();
        assert!(result.edge < 0.0);
        assert!(!result.is_positive());
    }

    #[test]
    fn test_edge_and_ev_agree_in_sign() {
        for odds in [-300, -110, 100, 250] {
            for p in [0.05, 0.3, 0.5, 0.7, 0.95] {
                let result = evaluate_edge(p, odds).unwrap();
                if result.edge.abs() > 1e-9 {
                    assert_eq!(result.edge > 0.0, result.expected_value > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_invalid_odds() {
        assert_matches!(evaluate_edge(0.5, 0), Err(OddsError::InvalidOdds(0)));
    }
}
