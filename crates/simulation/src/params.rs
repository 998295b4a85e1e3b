//! Simulation parameters.

use config::SimulationSettings;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SimulationError, SimulationResult};

/// Default number of draws per simulation.
pub const DEFAULT_N_DRAWS: usize = 15_000;

/// Default home/away score correlation.
pub const DEFAULT_CORRELATION: f64 = 0.30;

/// Parameters for one simulation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of samples drawn.
    pub n_draws: usize,
    /// Correlation between home and away scores.
    pub correlation: f64,
    /// Fixed seed; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_draws: DEFAULT_N_DRAWS,
            correlation: DEFAULT_CORRELATION,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(n_draws: usize, correlation: f64) -> Self {
        Self {
            n_draws,
            correlation,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> SimulationResult<()> {
        if self.n_draws < 1 {
            return Err(SimulationError::InvalidSimulationConfig(
                "n_draws must be at least 1".to_string(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.correlation) {
            return Err(SimulationError::InvalidSimulationConfig(format!(
                "correlation must be within [-1, 1], got: {}",
                self.correlation
            )));
        }
        Ok(())
    }

    /// Config for the `index`-th of several independent runs.
    ///
    /// Seeded configs get a distinct, reproducible seed per index.
    pub fn for_stream(&self, index: u64) -> Self {
        Self {
            seed: self.seed.map(|seed| seed.wrapping_add(index)),
            ..*self
        }
    }

    pub(crate) fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

impl TryFrom<&SimulationSettings> for SimulationConfig {
    type Error = SimulationError;

    fn try_from(settings: &SimulationSettings) -> SimulationResult<Self> {
        let n_draws = usize::try_from(settings.n_draws).map_err(|_| {
            SimulationError::InvalidSimulationConfig(format!(
                "n_draws must be at least 1, got: {}",
                settings.n_draws
            ))
        })?;
        let config = Self {
            n_draws,
            correlation: settings.correlation,
            seed: settings.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
