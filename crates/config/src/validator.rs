use crate::*;
use thiserror::Error;

/// Largest draw count accepted without a slowness warning
pub const MAX_RECOMMENDED_DRAWS: i64 = 500_000;
/// Smallest draw count accepted without a noise warning
pub const MIN_RECOMMENDED_DRAWS: i64 = 5_000;
/// Reduction range offered by the injury manager
pub const LIMITED_REDUCTION_RANGE: (f64, f64) = (5.0, 60.0);

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Ratings: {message}")]
    InvalidRatings { message: String },

    #[error("Default team rating: {message}")]
    InvalidDefaultTeam { message: String },

    #[error("Simulation: {message}")]
    InvalidSimulation { message: String },

    #[error("{field} must be a positive integer")]
    InvalidPositiveInteger { field: String },

    #[error("{field} must be a positive float")]
    InvalidPositiveFloat { field: String },

    #[error("{field} must be between 0 and 100")]
    InvalidPercentageRange { field: String },

    #[error("Markets: {message}")]
    InvalidMarkets { message: String },

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Environment variable placeholder in '{field}' is unresolved: {value}")]
    InvalidEnvVar { field: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DefaultApplied {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub defaults_applied: Vec<DefaultApplied>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            defaults_applied: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_default(&mut self, field: &str, value: &str) {
        self.defaults_applied.push(DefaultApplied {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_config(config: &MasterConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_ratings(&config.ratings, &mut report);
    validate_simulation(&config.simulation, &mut report);
    validate_model(&config.model, &mut report);
    validate_markets(&config.markets, &mut report);

    if !matches!(config.logging.format.to_lowercase().as_str(), "pretty" | "json" | "compact") {
        report.add_error(ValidationError::InvalidLogFormat(config.logging.format.clone()));
    }

    report
}

fn validate_ratings(ratings: &RatingsConfig, report: &mut ValidationReport) {
    for (field, value) in [
        ("ratings.team_ratings", &ratings.team_ratings),
        ("ratings.player_ratings", &ratings.player_ratings),
    ] {
        if value.trim().is_empty() {
            report.add_error(ValidationError::InvalidRatings {
                message: format!("{} path is required", field),
            });
        } else if has_unresolved_env_vars(value) {
            report.add_error(ValidationError::InvalidEnvVar {
                field: field.to_string(),
                value: value.clone(),
            });
        }
    }

    let team = &ratings.default_team;
    for (name, value) in [
        ("offense_rating", team.offense_rating),
        ("defense_rating", team.defense_rating),
        ("pace", team.pace),
        ("volatility", team.volatility),
    ] {
        if !(value > 0.0) {
            report.add_error(ValidationError::InvalidDefaultTeam {
                message: format!("{} must be positive, got: {}", name, value),
            });
        }
    }

    if *team == default_team_rating() {
        report.add_default(
            "ratings.default_team",
            &format!(
                "off={} def={} pace={} volatility={}",
                team.offense_rating, team.defense_rating, team.pace, team.volatility
            ),
        );
    }
}

fn validate_simulation(simulation: &SimulationSettings, report: &mut ValidationReport) {
    if simulation.n_draws < 1 {
        report.add_error(ValidationError::InvalidPositiveInteger {
            field: "simulation.n_draws".to_string(),
        });
    } else if simulation.n_draws < MIN_RECOMMENDED_DRAWS {
        report.add_warning(
            "simulation.n_draws",
            &format!(
                "{} draws leaves sampling noise above one percentage point",
                simulation.n_draws
            ),
        );
    } else if simulation.n_draws > MAX_RECOMMENDED_DRAWS {
        report.add_warning(
            "simulation.n_draws",
            &format!("{} draws per market will be slow", simulation.n_draws),
        );
    }

    if !(-1.0..=1.0).contains(&simulation.correlation) {
        report.add_error(ValidationError::InvalidSimulation {
            message: format!(
                "correlation must be within [-1, 1], got: {}",
                simulation.correlation
            ),
        });
    }

    match simulation.seed {
        Some(seed) => report.add_default("simulation.seed", &seed.to_string()),
        None => report.add_default("simulation.seed", "entropy"),
    }
}

fn validate_model(model: &ModelConfig, report: &mut ValidationReport) {
    for (field, value) in [
        ("model.rating_baseline", model.rating_baseline),
        ("model.points_baseline", model.points_baseline),
        ("model.pace_baseline", model.pace_baseline),
        ("model.home_court_factor", model.home_court_factor),
        ("model.away_court_factor", model.away_court_factor),
        ("model.base_score_sd", model.base_score_sd),
        ("model.sd_reference_points", model.sd_reference_points),
        ("model.player_home_factor", model.player_home_factor),
        ("model.back_to_back_factor", model.back_to_back_factor),
    ] {
        if !(value > 0.0) {
            report.add_error(ValidationError::InvalidPositiveFloat {
                field: field.to_string(),
            });
        }
    }

    if model.home_court_factor < model.away_court_factor {
        report.add_warning(
            "model.home_court_factor",
            "home court factor is below the away factor; home teams are penalised",
        );
    }
}

fn validate_markets(markets: &MarketDefaults, report: &mut ValidationReport) {
    if markets.odds == 0 {
        report.add_error(ValidationError::InvalidMarkets {
            message: "default odds cannot be 0".to_string(),
        });
    } else if markets.odds > -100 && markets.odds < 100 {
        report.add_warning(
            "markets.odds",
            &format!("{} is not a conventional American price", markets.odds),
        );
    }

    let pct = markets.limited_reduction_pct;
    if !(0.0..=100.0).contains(&pct) {
        report.add_error(ValidationError::InvalidPercentageRange {
            field: "markets.limited_reduction_pct".to_string(),
        });
    } else if pct < LIMITED_REDUCTION_RANGE.0 || pct > LIMITED_REDUCTION_RANGE.1 {
        report.add_warning(
            "markets.limited_reduction_pct",
            &format!(
                "{}% is outside the usual {}-{}% range",
                pct, LIMITED_REDUCTION_RANGE.0, LIMITED_REDUCTION_RANGE.1
            ),
        );
    }
}
