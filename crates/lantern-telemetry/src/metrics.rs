//! Explicitly constructed Prometheus registry.

use prometheus::{Encoder, Registry, TextEncoder};

use crate::TelemetryError;

/// Handle owning the process's metrics registry.
///
/// Constructed once at startup and shared; collectors are registered against
/// [`MetricsHandle::registry`]. Dropping the handle drops the registry and
/// everything registered on it.
#[derive(Default)]
pub struct MetricsHandle {
    registry: Registry,
}

impl MetricsHandle {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry collectors are registered against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode all registered metrics as Prometheus text format.
    pub fn encode(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| TelemetryError::Encode(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::Encode(e.to_string()))
    }
}
