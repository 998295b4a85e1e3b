pub fn default_offense_rating() -> f64 {
    114.0
}

pub fn default_defense_rating() -> f64 {
    114.0
}

pub fn default_pace() -> f64 {
    100.0
}

pub fn default_volatility() -> f64 {
    1.0
}

pub fn default_team_rating() -> super::DefaultTeamRating {
    super::DefaultTeamRating {
        offense_rating: default_offense_rating(),
        defense_rating: default_defense_rating(),
        pace: default_pace(),
        volatility: default_volatility(),
    }
}

pub fn default_n_draws() -> i64 {
    15_000
}

pub fn default_correlation() -> f64 {
    0.30
}

pub fn default_rating_baseline() -> f64 {
    114.0
}

pub fn default_points_baseline() -> f64 {
    112.0
}

pub fn default_pace_baseline() -> f64 {
    100.0
}

pub fn default_home_court_factor() -> f64 {
    1.025
}

pub fn default_away_court_factor() -> f64 {
    0.975
}

pub fn default_base_score_sd() -> f64 {
    11.0
}

pub fn default_sd_reference_points() -> f64 {
    110.0
}

pub fn default_player_home_factor() -> f64 {
    1.02
}

pub fn default_back_to_back_factor() -> f64 {
    0.97
}

pub fn default_odds() -> i32 {
    -110
}

pub fn default_spread_line() -> f64 {
    -5.5
}

pub fn default_limited_reduction_pct() -> f64 {
    15.0
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}
