//! # Lantern Telemetry
//!
//! Metrics and logging for the peer connection orchestrator.
//!
//! The metrics registry is an explicitly constructed object owned by the
//! host application and passed to whoever registers collectors on it; there
//! is no ambient global meter. The [`ObservabilityPublisher`] exposes node
//! facts (multi-addresses, block height, derived age) as gauges, pulling a
//! fresh snapshot from its facts source on every observation cycle.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let metrics = MetricsHandle::new();
//! let publisher = ObservabilityPublisher::register(metrics.registry(), source)?;
//!
//! // driven by a periodic scheduler:
//! publisher.observe().await;
//!
//! // served on /metrics:
//! let text = metrics.encode()?;
//! ```

mod metrics;
mod publisher;

pub use metrics::MetricsHandle;
pub use publisher::{
    days_difference, days_difference_at, BlockFact, FactsSource, MultiAddrFact,
    ObservabilityPublisher, UNPARSABLE_AGE,
};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Telemetry initialization and encoding errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A collector could not be registered.
    #[error("failed to register metrics: {0}")]
    MetricsInit(String),

    /// The registry could not be encoded to text format.
    #[error("failed to encode metrics: {0}")]
    Encode(String),

    /// The tracing subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies. Call once at
/// startup.
pub fn init_logging(default_level: &str) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}
