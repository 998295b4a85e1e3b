//! Correlated game score simulation.

use projection::TeamProjection;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;
use tracing::debug;

use crate::error::SimulationResult;
use crate::params::SimulationConfig;

/// Draws of one simulated game.
///
/// Every probability is a frequency over the same draws, and each away,
/// under or not-cover side is computed as the complement of the other.
#[derive(Debug, Clone, Serialize)]
pub struct GameSampleSet {
    home_scores: Vec<f64>,
    away_scores: Vec<f64>,
}

impl GameSampleSet {
    pub fn n_draws(&self) -> usize {
        self.home_scores.len()
    }

    pub fn home_scores(&self) -> &[f64] {
        &self.home_scores
    }

    pub fn away_scores(&self) -> &[f64] {
        &self.away_scores
    }

    pub fn margins(&self) -> impl Iterator<Item = f64> + '_ {
        self.home_scores
            .iter()
            .zip(&self.away_scores)
            .map(|(home, away)| home - away)
    }

    pub fn totals(&self) -> impl Iterator<Item = f64> + '_ {
        self.home_scores
            .iter()
            .zip(&self.away_scores)
            .map(|(home, away)| home + away)
    }

    fn frequency(&self, hits: usize) -> f64 {
        hits as f64 / self.n_draws() as f64
    }

    /// `P(margin > 0)`
    pub fn home_win_probability(&self) -> f64 {
        self.frequency(self.margins().filter(|m| *m > 0.0).count())
    }

    pub fn away_win_probability(&self) -> f64 {
        1.0 - self.home_win_probability()
    }

    /// `P(margin > line)`
    pub fn home_cover_probability(&self, line: f64) -> f64 {
        self.frequency(self.margins().filter(|m| *m > line).count())
    }

    pub fn away_cover_probability(&self, line: f64) -> f64 {
        1.0 - self.home_cover_probability(line)
    }

    /// `P(total > line)`
    pub fn over_probability(&self, line: f64) -> f64 {
        self.frequency(self.totals().filter(|t| *t > line).count())
    }

    pub fn under_probability(&self, line: f64) -> f64 {
        1.0 - self.over_probability(line)
    }

    pub fn mean_home(&self) -> f64 {
        mean(self.home_scores.iter().copied(), self.n_draws())
    }

    pub fn mean_away(&self) -> f64 {
        mean(self.away_scores.iter().copied(), self.n_draws())
    }

    pub fn mean_margin(&self) -> f64 {
        mean(self.margins(), self.n_draws())
    }

    pub fn mean_total(&self) -> f64 {
        mean(self.totals(), self.n_draws())
    }

    /// Mean total rounded to one decimal, the default line for a totals market.
    pub fn suggested_total_line(&self) -> f64 {
        (self.mean_total() * 10.0).round() / 10.0
    }
}

fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    values.sum::<f64>() / n as f64
}

/// Draw `n_draws` home/away score pairs from a bivariate normal.
///
/// Uses the Cholesky factor of the 2x2 covariance:
/// `home = mh + sh*z1`, `away = ma + sa*(rho*z1 + sqrt(1 - rho^2)*z2)`.
pub fn simulate_game(
    home: &TeamProjection,
    away: &TeamProjection,
    config: &SimulationConfig,
) -> SimulationResult<GameSampleSet> {
    config.validate()?;

    let rho = config.correlation;
    let residual = (1.0 - rho * rho).max(0.0).sqrt();
    let mut rng = config.rng();

    let mut home_scores = Vec::with_capacity(config.n_draws);
    let mut away_scores = Vec::with_capacity(config.n_draws);
    for _ in 0..config.n_draws {
        let z1: f64 = rng.sample(StandardNormal);
        let z2: f64 = rng.sample(StandardNormal);
        home_scores.push(home.mean_points + home.score_sd * z1);
        away_scores.push(away.mean_points + away.score_sd * (rho * z1 + residual * z2));
    }

    let samples = GameSampleSet {
        home_scores,
        away_scores,
    };

    debug!(
        n_draws = config.n_draws,
        correlation = rho,
        mean_home = samples.mean_home(),
        mean_away = samples.mean_away(),
        "Simulated game"
    );

    Ok(samples)
}
