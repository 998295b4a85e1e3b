//! Domain types for projections.

use common::{PlayerId, TeamId};
use config::DefaultTeamRating;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::ProjectionError;

fn default_volatility() -> f64 {
    1.0
}

/// Ratings of one team.
///
/// `volatility` is optional in the ratings document and resolves to `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamRating {
    /// Points scored per 100 possessions.
    #[serde(alias = "off")]
    pub offense_rating: f64,
    /// Points allowed per 100 possessions.
    #[serde(alias = "def")]
    pub defense_rating: f64,
    /// Possessions per 48 minutes.
    pub pace: f64,
    /// Multiplier on score and stat deviations.
    #[serde(default = "default_volatility")]
    pub volatility: f64,
}

impl TeamRating {
    /// Create a rating with the neutral volatility of `1.0`.
    pub fn new(offense_rating: f64, defense_rating: f64, pace: f64) -> Self {
        Self {
            offense_rating,
            defense_rating,
            pace,
            volatility: default_volatility(),
        }
    }

    /// Override volatility.
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }
}

impl Default for TeamRating {
    fn default() -> Self {
        DefaultTeamRating::default().into()
    }
}

impl From<DefaultTeamRating> for TeamRating {
    fn from(rating: DefaultTeamRating) -> Self {
        Self {
            offense_rating: rating.offense_rating,
            defense_rating: rating.defense_rating,
            pace: rating.pace,
            volatility: rating.volatility,
        }
    }
}

/// Stat lines a player prop can be written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Points,
    Rebounds,
    Assists,
    ThreeMade,
    PointsReboundsAssists,
}

/// Per-stat model parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatParams {
    /// How strongly usage scales the stat average.
    pub usage_weight: f64,
    /// Standard deviation before the team volatility multiplier.
    pub base_sd: f64,
}

/// Stat parameter table, indexed in `StatKind::ALL` order.
const STAT_TABLE: [StatParams; 5] = [
    StatParams {
        usage_weight: 1.0,
        base_sd: 3.2,
    },
    StatParams {
        usage_weight: 0.25,
        base_sd: 2.6,
    },
    StatParams {
        usage_weight: 0.7,
        base_sd: 2.2,
    },
    StatParams {
        usage_weight: 0.4,
        base_sd: 1.2,
    },
    StatParams {
        usage_weight: 0.6,
        base_sd: 3.2,
    },
];

impl StatKind {
    pub const ALL: [StatKind; 5] = [
        StatKind::Points,
        StatKind::Rebounds,
        StatKind::Assists,
        StatKind::ThreeMade,
        StatKind::PointsReboundsAssists,
    ];

    /// Model parameters for this stat.
    pub fn params(&self) -> StatParams {
        STAT_TABLE[*self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKind::Points => "points",
            StatKind::Rebounds => "rebounds",
            StatKind::Assists => "assists",
            StatKind::ThreeMade => "three_made",
            StatKind::PointsReboundsAssists => "points_rebounds_assists",
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "points" | "pts" => Ok(StatKind::Points),
            "rebounds" | "reb" => Ok(StatKind::Rebounds),
            "assists" | "ast" => Ok(StatKind::Assists),
            "three_made" | "threes" | "3pm" => Ok(StatKind::ThreeMade),
            "points_rebounds_assists" | "pra" => Ok(StatKind::PointsReboundsAssists),
            _ => Err(ProjectionError::UnsupportedStat(s.to_string())),
        }
    }
}

/// Ratings of one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub team: TeamId,
    /// Fractional share of team possessions, 0..=1.
    pub usage: f64,
    /// Per-game averages; absent stats count as zero.
    pub stat_averages: BTreeMap<StatKind, f64>,
}

impl PlayerRating {
    pub fn new(team: impl Into<TeamId>, usage: f64) -> Self {
        Self {
            team: team.into(),
            usage,
            stat_averages: BTreeMap::new(),
        }
    }

    pub fn with_stat(mut self, kind: StatKind, average: f64) -> Self {
        self.stat_averages.insert(kind, average);
        self
    }

    /// Copy of this rating carrying an adjusted usage.
    pub fn with_usage(&self, usage: f64) -> Self {
        Self {
            usage,
            ..self.clone()
        }
    }

    pub fn stat_average(&self, kind: StatKind) -> f64 {
        self.stat_averages.get(&kind).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjuryStatus {
    Out,
    Limited,
}

/// Injury selection for one player for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryDesignation {
    pub player: PlayerId,
    pub status: InjuryStatus,
    /// Usage reduction in percent; only read when `Limited`.
    pub reduction_pct: f64,
}

impl InjuryDesignation {
    pub fn out(player: impl Into<PlayerId>) -> Self {
        Self {
            player: player.into(),
            status: InjuryStatus::Out,
            reduction_pct: 100.0,
        }
    }

    pub fn limited(player: impl Into<PlayerId>, reduction_pct: f64) -> Self {
        Self {
            player: player.into(),
            status: InjuryStatus::Limited,
            reduction_pct,
        }
    }

    /// Usage removed from a player currently at `usage`.
    pub fn lost_usage(&self, usage: f64) -> f64 {
        match self.status {
            InjuryStatus::Out => usage,
            InjuryStatus::Limited => usage * self.reduction_pct.clamp(0.0, 100.0) / 100.0,
        }
    }
}

/// Game context applied to a player projection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SituationalFlags {
    /// Player's team is hosting.
    pub is_home: bool,
    /// Second night of consecutive days.
    pub back_to_back: bool,
    /// Extra percentage knocked off the projection for a playing-through injury.
    pub injury_impact_pct: f64,
}

/// Mean score and deviation for one team in one game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamProjection {
    pub mean_points: f64,
    pub score_sd: f64,
}

/// Mean and deviation of one stat line for one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerProjection {
    pub kind: StatKind,
    pub mean: f64,
    pub sd: f64,
}
