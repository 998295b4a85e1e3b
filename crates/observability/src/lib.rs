//! Logging and metrics for HoopsEdge
//!
//! - [`logging`] installs the tracing subscriber (pretty, json or compact)
//! - [`metrics`] installs the Prometheus exporter and defines
//!   [`SimulationMetrics`], recorded around every game and prop simulation
//!
//! ```ignore
//! observability::init_logging("hoopsedge", LogFormat::Json, false)?;
//! observability::init_metrics(9090)?;
//!
//! let game = SimulationMetrics::new("game");
//! let _guard = game.start(15_000);
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{init_metrics, SimulationMetrics, SimulationMetricsGuard};
