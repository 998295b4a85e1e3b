//! Player prop simulation.
//!
//! Players are simulated independently of each other and of the game score.

use ordered_float::OrderedFloat;
use projection::{PlayerProjection, StatKind};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;
use tracing::debug;

use crate::error::SimulationResult;
use crate::params::SimulationConfig;

/// Draws of one player stat line, kept sorted ascending.
#[derive(Debug, Clone, Serialize)]
pub struct PropSampleSet {
    kind: StatKind,
    samples: Vec<f64>,
}

impl PropSampleSet {
    pub fn kind(&self) -> StatKind {
        self.kind
    }

    pub fn n_draws(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// `P(sample >= line)`
    pub fn over_probability(&self, line: f64) -> f64 {
        let below = self.samples.partition_point(|s| *s < line);
        (self.samples.len() - below) as f64 / self.samples.len() as f64
    }

    pub fn under_probability(&self, line: f64) -> f64 {
        1.0 - self.over_probability(line)
    }

    pub fn mean(&self) -> f64 {
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Nearest-rank quantile, `q` clamped to `[0, 1]`.
    pub fn quantile(&self, q: f64) -> f64 {
        let last = self.samples.len() - 1;
        let rank = (q.clamp(0.0, 1.0) * last as f64).round() as usize;
        self.samples[rank.min(last)]
    }

    pub fn median(&self) -> f64 {
        self.quantile(0.5)
    }
}

/// Draw `n_draws` normal samples around a player projection.
pub fn simulate_prop(
    projection: &PlayerProjection,
    config: &SimulationConfig,
) -> SimulationResult<PropSampleSet> {
    config.validate()?;

    let mut rng = config.rng();
    let mut samples: Vec<f64> = (0..config.n_draws)
        .map(|_| {
            let z: f64 = rng.sample(StandardNormal);
            projection.mean + projection.sd * z
        })
        .collect();
    samples.sort_unstable_by_key(|s| OrderedFloat(*s));

    debug!(
        stat = %projection.kind,
        mean = projection.mean,
        sd = projection.sd,
        n_draws = config.n_draws,
        "Simulated prop"
    );

    Ok(PropSampleSet {
        kind: projection.kind,
        samples,
    })
}
