//! Metrics configuration.

use std::env;

/// Whether `/api/metrics` exposes the Prometheus registry
#[derive(Clone, Debug)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("METRICS_ENABLED")
            .map(|v| v.trim().to_lowercase() != "false")
            .unwrap_or(true);

        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}
