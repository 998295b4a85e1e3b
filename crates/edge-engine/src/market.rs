//! Market queries and the probability each one reads from a sample set.

use odds::EdgeResult;
use serde::{Deserialize, Serialize};
use simulation::{GameSampleSet, PropSampleSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketKind {
    Moneyline,
    Spread,
    Total,
    PlayerProp,
}

impl MarketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketKind::Moneyline => "moneyline",
            MarketKind::Spread => "spread",
            MarketKind::Total => "total",
            MarketKind::PlayerProp => "player_prop",
        }
    }

    pub fn accepts(&self, side: MarketSide) -> bool {
        match self {
            MarketKind::Moneyline | MarketKind::Spread => {
                matches!(side, MarketSide::Home | MarketSide::Away)
            }
            MarketKind::Total | MarketKind::PlayerProp => {
                matches!(side, MarketSide::Over | MarketSide::Under)
            }
        }
    }
}

impl fmt::Display for MarketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "moneyline" | "ml" => Ok(MarketKind::Moneyline),
            "spread" => Ok(MarketKind::Spread),
            "total" => Ok(MarketKind::Total),
            "player_prop" | "prop" => Ok(MarketKind::PlayerProp),
            _ => Err(format!("unknown market kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSide {
    Home,
    Away,
    Over,
    Under,
}

impl MarketSide {
    pub fn opposite(&self) -> Self {
        match self {
            MarketSide::Home => MarketSide::Away,
            MarketSide::Away => MarketSide::Home,
            MarketSide::Over => MarketSide::Under,
            MarketSide::Under => MarketSide::Over,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSide::Home => "home",
            MarketSide::Away => "away",
            MarketSide::Over => "over",
            MarketSide::Under => "under",
        }
    }
}

impl fmt::Display for MarketSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(MarketSide::Home),
            "away" => Ok(MarketSide::Away),
            "over" => Ok(MarketSide::Over),
            "under" => Ok(MarketSide::Under),
            _ => Err(format!("unknown side: {}", s)),
        }
    }
}

/// One side of one market at one price.
///
/// For spreads `line` is the home margin threshold: home covers when
/// `home - away > line`. Moneylines ignore `line`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketQuery {
    pub kind: MarketKind,
    pub line: f64,
    pub side: MarketSide,
    /// American odds
    pub odds: i32,
}

impl MarketQuery {
    pub fn new(kind: MarketKind, line: f64, side: MarketSide, odds: i32) -> EngineResult<Self> {
        let query = Self {
            kind,
            line,
            side,
            odds,
        };
        query.check_side()?;
        Ok(query)
    }

    pub fn moneyline(side: MarketSide, odds: i32) -> EngineResult<Self> {
        Self::new(MarketKind::Moneyline, 0.0, side, odds)
    }

    pub fn spread(side: MarketSide, line: f64, odds: i32) -> EngineResult<Self> {
        Self::new(MarketKind::Spread, line, side, odds)
    }

    pub fn total(side: MarketSide, line: f64, odds: i32) -> EngineResult<Self> {
        Self::new(MarketKind::Total, line, side, odds)
    }

    pub fn player_prop(side: MarketSide, line: f64, odds: i32) -> EngineResult<Self> {
        Self::new(MarketKind::PlayerProp, line, side, odds)
    }

    /// Same market and line, other side, at `odds`.
    pub fn opposite(&self, odds: i32) -> Self {
        Self {
            side: self.side.opposite(),
            odds,
            ..*self
        }
    }

    fn check_side(&self) -> EngineResult<()> {
        if self.kind.accepts(self.side) {
            Ok(())
        } else {
            Err(EngineError::SideMismatch {
                kind: self.kind,
                side: self.side,
            })
        }
    }

    /// Probability of this side from a simulated game.
    pub fn game_probability(&self, samples: &GameSampleSet) -> EngineResult<f64> {
        self.check_side()?;
        let probability = match (self.kind, self.side) {
            (MarketKind::Moneyline, MarketSide::Home) => samples.home_win_probability(),
            (MarketKind::Moneyline, _) => samples.away_win_probability(),
            (MarketKind::Spread, MarketSide::Home) => samples.home_cover_probability(self.line),
            (MarketKind::Spread, _) => samples.away_cover_probability(self.line),
            (MarketKind::Total, MarketSide::Over) => samples.over_probability(self.line),
            (MarketKind::Total, _) => samples.under_probability(self.line),
            (MarketKind::PlayerProp, _) => {
                return Err(EngineError::InvalidQuery(
                    "player prop cannot be priced from game draws".to_string(),
                ))
            }
        };
        Ok(probability)
    }

    /// Probability of this side from a simulated stat line.
    pub fn prop_probability(&self, samples: &PropSampleSet) -> EngineResult<f64> {
        self.check_side()?;
        match (self.kind, self.side) {
            (MarketKind::PlayerProp, MarketSide::Over) => Ok(samples.over_probability(self.line)),
            (MarketKind::PlayerProp, _) => Ok(samples.under_probability(self.line)),
            (kind, _) => Err(EngineError::InvalidQuery(format!(
                "{} market cannot be priced from prop draws",
                kind
            ))),
        }
    }
}

impl fmt::Display for MarketQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MarketKind::Moneyline => write!(f, "{} {} ({:+})", self.kind, self.side, self.odds),
            _ => write!(
                f,
                "{} {} {} ({:+})",
                self.kind, self.side, self.line, self.odds
            ),
        }
    }
}

/// A query and its priced edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketEvaluation {
    pub query: MarketQuery,
    pub result: EdgeResult,
}

/// The queried side and its opposite, priced from the same draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BothSides {
    pub queried: MarketEvaluation,
    pub opposite: MarketEvaluation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use projection::{PlayerProjection, StatKind, TeamProjection};
    use simulation::{simulate_game, simulate_prop, SimulationConfig};

    fn game() -> GameSampleSet {
        let home = TeamProjection {
            mean_points: 115.0,
            score_sd: 11.5,
        };
        let away = TeamProjection {
            mean_points: 108.0,
            score_sd: 10.8,
        };
        simulate_game(&home, &away, &SimulationConfig::new(10_000, 0.3).with_seed(4)).unwrap()
    }

    #[test]
    fn test_side_validation() {
        assert_matches!(
            MarketQuery::moneyline(MarketSide::Over, -110),
            Err(EngineError::SideMismatch {
                kind: MarketKind::Moneyline,
                side: MarketSide::Over
            })
        );
        assert_matches!(
            MarketQuery::total(MarketSide::Home, 220.5, -110),
            Err(EngineError::SideMismatch { .. })
        );
        assert!(MarketQuery::spread(MarketSide::Away, -5.5, -110).is_ok());
    }

    #[test]
    fn test_game_probabilities_map_to_samples() {
        let samples = game();

        let ml = MarketQuery::moneyline(MarketSide::Away, 150).unwrap();
        assert_eq!(ml.game_probability(&samples).unwrap(), samples.away_win_probability());

        let spread = MarketQuery::spread(MarketSide::Home, 5.5, -110).unwrap();
        assert_eq!(
            spread.game_probability(&samples).unwrap(),
            samples.home_cover_probability(5.5)
        );

        let under = MarketQuery::total(MarketSide::Under, 223.0, -110).unwrap();
        assert_eq!(under.game_probability(&samples).unwrap(), samples.under_probability(223.0));
    }

    #[test]
    fn test_wrong_sample_set() {
        let samples = game();
        let prop = MarketQuery::player_prop(MarketSide::Over, 20.5, -110).unwrap();
        assert_matches!(prop.game_probability(&samples), Err(EngineError::InvalidQuery(_)));

        let projection = PlayerProjection {
            kind: StatKind::Points,
            mean: 20.0,
            sd: 3.2,
        };
        let config = SimulationConfig::new(100, 0.3).with_seed(1);
        let draws = simulate_prop(&projection, &config).unwrap();
        let total = MarketQuery::total(MarketSide::Over, 220.5, -110).unwrap();
        assert_matches!(total.prop_probability(&draws), Err(EngineError::InvalidQuery(_)));
        assert_eq!(
            prop.prop_probability(&draws).unwrap(),
            draws.over_probability(20.5)
        );
    }

    #[test]
    fn test_opposite_and_parse() {
        let query = MarketQuery::total(MarketSide::Over, 218.5, -110).unwrap();
        let other = query.opposite(-105);
        assert_eq!(other.side, MarketSide::Under);
        assert_eq!(other.line, 218.5);
        assert_eq!(other.odds, -105);

        assert_eq!("ML".parse::<MarketKind>(), Ok(MarketKind::Moneyline));
        assert_eq!("under".parse::<MarketSide>(), Ok(MarketSide::Under));
        assert!("parlay".parse::<MarketKind>().is_err());
        assert_eq!(query.to_string(), "total over 218.5 (-110)");
    }
}
