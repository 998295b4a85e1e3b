use crate::error::OddsError;
use crate::Result;

/// Stake base of American odds notation
pub const AMERICAN_BASE: f64 = 100.0;

fn check(american: i32) -> Result<f64> {
    if american == 0 {
        return Err(OddsError::InvalidOdds(american));
    }
    Ok(american as f64)
}

/// Decimal payout factor for an American price.
///
/// `-110` becomes `1.909..`, `+150` becomes `2.5`.
pub fn decimal_odds(american: i32) -> Result<f64> {
    let odds = check(american)?;

    if odds < 0.0 {
        Ok(1.0 + AMERICAN_BASE / odds.abs())
    } else {
        Ok(1.0 + odds / AMERICAN_BASE)
    }
}

/// Break-even probability embedded in a decimal price
pub fn implied_probability(decimal_odds: f64) -> f64 {
    1.0 / decimal_odds
}

/// Profit per unit staked when the bet wins
pub fn american_profit(american: i32) -> Result<f64> {
    let odds = check(american)?;

    if odds > 0.0 {
        Ok(odds / AMERICAN_BASE)
    } else {
        Ok(AMERICAN_BASE / odds.abs())
    }
}

/// Expected profit per unit staked: `p * profit - (1 - p)`
pub fn expected_value(probability: f64, american: i32) -> Result<f64> {
    let profit = american_profit(american)?;
    Ok(probability * profit - (1.0 - probability))
}

/// Vig-free American price for a probability.
///
/// Returns `None` outside the open interval (0, 1) where no finite price exists.
pub fn fair_american_odds(probability: f64) -> Option<i32> {
    if !(probability > 0.0 && probability < 1.0) {
        return None;
    }

    let odds = if probability >= 0.5 {
        -(probability / (1.0 - probability)) * AMERICAN_BASE
    } else {
        ((1.0 - probability) / probability) * AMERICAN_BASE
    };

    Some(odds.round() as i32)
}
