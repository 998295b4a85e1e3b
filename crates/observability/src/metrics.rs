//! Prometheus metrics infrastructure
//!
//! This module installs the Prometheus exporter and defines the metric
//! set recorded around every Monte Carlo run.

use metrics::{counter, histogram, Counter, Histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// Initialize the Prometheus metrics exporter
///
/// This starts an HTTP server on the specified port that exposes metrics
/// at the `/metrics` endpoint. Must be called from within a tokio runtime.
///
/// # Example
///
/// ```ignore
/// observability::metrics::init_metrics(9090)?;
/// // Metrics available at http://localhost:9090/metrics
/// ```
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}

/// Simulation metrics for one kind of run (`game` or `prop`)
///
/// # Metrics
///
/// * `simulations_total` - Simulations completed
/// * `simulation_draws_total` - Samples drawn across all simulations
/// * `simulation_duration_seconds` - Wall time per simulation
///
/// # Example
///
/// ```ignore
/// let metrics = SimulationMetrics::new("game");
/// {
///     let _guard = metrics.start(15_000);
///     // ... draw samples ...
/// } // recorded on drop
/// ```
#[derive(Clone)]
pub struct SimulationMetrics {
    simulations_total: Counter,
    draws_total: Counter,
    duration: Histogram,
    kind: String,
}

impl SimulationMetrics {
    pub fn new(kind: &str) -> Self {
        let kind = kind.to_string();

        Self {
            simulations_total: counter!("simulations_total", "kind" => kind.clone()),
            draws_total: counter!("simulation_draws_total", "kind" => kind.clone()),
            duration: histogram!("simulation_duration_seconds", "kind" => kind.clone()),
            kind,
        }
    }

    /// Record a finished simulation
    pub fn record(&self, duration: Duration, n_draws: usize) {
        self.simulations_total.increment(1);
        self.draws_total.increment(n_draws as u64);
        self.duration.record(duration.as_secs_f64());
    }

    /// Start timing a simulation of `n_draws` samples
    pub fn start(&self, n_draws: usize) -> SimulationMetricsGuard<'_> {
        SimulationMetricsGuard::new(self, n_draws)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// Guard that records one simulation when dropped
pub struct SimulationMetricsGuard<'a> {
    metrics: &'a SimulationMetrics,
    start: Instant,
    n_draws: usize,
}

impl<'a> SimulationMetricsGuard<'a> {
    pub fn new(metrics: &'a SimulationMetrics, n_draws: usize) -> Self {
        Self {
            metrics,
            start: Instant::now(),
            n_draws,
        }
    }
}

impl Drop for SimulationMetricsGuard<'_> {
    fn drop(&mut self) {
        self.metrics.record(self.start.elapsed(), self.n_draws);
    }
}
