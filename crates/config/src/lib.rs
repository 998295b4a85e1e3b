use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

/// Root of the YAML configuration file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MasterConfig {
    pub ratings: RatingsConfig,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub markets: MarketDefaults,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where team and player ratings are read from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RatingsConfig {
    /// JSON document keyed by team name
    pub team_ratings: String,
    /// JSON document keyed by player name
    pub player_ratings: String,
    /// Rating used for teams absent from `team_ratings`
    #[serde(default = "default_team_rating")]
    pub default_team: DefaultTeamRating,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct DefaultTeamRating {
    #[serde(default = "default_offense_rating")]
    pub offense_rating: f64,
    #[serde(default = "default_defense_rating")]
    pub defense_rating: f64,
    #[serde(default = "default_pace")]
    pub pace: f64,
    #[serde(default = "default_volatility")]
    pub volatility: f64,
}

impl Default for DefaultTeamRating {
    fn default() -> Self {
        default_team_rating()
    }
}

/// Monte Carlo settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    #[serde(default = "default_n_draws")]
    pub n_draws: i64,
    #[serde(default = "default_correlation")]
    pub correlation: f64,
    /// Fixed seed for reproducible runs; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            n_draws: default_n_draws(),
            correlation: default_correlation(),
            seed: None,
        }
    }
}

/// Constants of the team and player projection formulas
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ModelConfig {
    /// League-average offensive/defensive rating
    #[serde(default = "default_rating_baseline")]
    pub rating_baseline: f64,
    /// Points scored by a league-average team at baseline pace
    #[serde(default = "default_points_baseline")]
    pub points_baseline: f64,
    #[serde(default = "default_pace_baseline")]
    pub pace_baseline: f64,
    #[serde(default = "default_home_court_factor")]
    pub home_court_factor: f64,
    #[serde(default = "default_away_court_factor")]
    pub away_court_factor: f64,
    #[serde(default = "default_base_score_sd")]
    pub base_score_sd: f64,
    /// Team mean at which the score deviation equals `base_score_sd`
    #[serde(default = "default_sd_reference_points")]
    pub sd_reference_points: f64,
    #[serde(default = "default_player_home_factor")]
    pub player_home_factor: f64,
    #[serde(default = "default_back_to_back_factor")]
    pub back_to_back_factor: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            rating_baseline: default_rating_baseline(),
            points_baseline: default_points_baseline(),
            pace_baseline: default_pace_baseline(),
            home_court_factor: default_home_court_factor(),
            away_court_factor: default_away_court_factor(),
            base_score_sd: default_base_score_sd(),
            sd_reference_points: default_sd_reference_points(),
            player_home_factor: default_player_home_factor(),
            back_to_back_factor: default_back_to_back_factor(),
        }
    }
}

/// Fallback market inputs when the caller does not supply them
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketDefaults {
    #[serde(default = "default_odds")]
    pub odds: i32,
    #[serde(default = "default_spread_line")]
    pub spread_line: f64,
    /// Usage reduction applied to a `Limited` player without an explicit percentage
    #[serde(default = "default_limited_reduction_pct")]
    pub limited_reduction_pct: f64,
}

impl Default for MarketDefaults {
    fn default() -> Self {
        Self {
            odds: default_odds(),
            spread_line: default_spread_line(),
            limited_reduction_pct: default_limited_reduction_pct(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// One of `pretty`, `json`, `compact`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_config() {
        let yaml = include_str!("../../../master_config/hoopsedge.yaml");
        let config: MasterConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.ratings.team_ratings, "data/team_ratings.json");
        assert_eq!(config.ratings.player_ratings, "data/player_ratings.json");
        assert_eq!(config.simulation.n_draws, 15_000);
        assert!((config.simulation.correlation - 0.30).abs() < 1e-12);
        assert_eq!(config.markets.odds, -110);
        assert_eq!(config.logging.format, "pretty");

        let report = validate_config(&config);
        assert!(report.is_valid(), "{:?}", report.errors);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let yaml = r#"
ratings:
  team_ratings: "teams.json"
  player_ratings: "players.json"
"#;
        let config: MasterConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.ratings.default_team, DefaultTeamRating::default());
        assert_eq!(config.simulation.n_draws, 15_000);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.model, ModelConfig::default());
        assert!((config.model.home_court_factor - 1.025).abs() < 1e-12);
        assert!((config.markets.spread_line + 5.5).abs() < 1e-12);
        assert!((config.markets.limited_reduction_pct - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_default_team() {
        let yaml = r#"
ratings:
  team_ratings: "teams.json"
  player_ratings: "players.json"
  default_team:
    pace: 98.5
simulation:
  n_draws: 20000
  correlation: 0.1
  seed: 42
"#;
        let config: MasterConfig = serde_yaml::from_str(yaml).unwrap();

        assert!((config.ratings.default_team.pace - 98.5).abs() < 1e-12);
        assert!((config.ratings.default_team.volatility - 1.0).abs() < 1e-12);
        assert_eq!(config.simulation.n_draws, 20_000);
        assert_eq!(config.simulation.seed, Some(42));
    }

    #[test]
    fn test_generate_default_config() {
        let config = parser::generate_default_config();

        assert_eq!(config.simulation.n_draws, 15_000);
        assert_eq!(config.model, ModelConfig::default());
        assert!(validate_config(&config).is_valid());
    }
}
