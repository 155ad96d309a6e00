//! Configuration structures and loading utilities.
//!
//! Every structure loads itself from environment variables and falls back
//! to defaults, so the service starts even when LiveKit is not configured.

pub mod livekit;
pub mod metrics;
pub mod naming;
pub mod server;

pub use livekit::*;
pub use metrics::*;
pub use naming::*;
pub use server::*;

/// Everything the app factory needs besides the metrics registry
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    pub livekit: LiveKitConfig,
    pub naming: NamingConfig,
    pub metrics: MetricsConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            livekit: LiveKitConfig::from_env(),
            naming: NamingConfig::from_env(),
            metrics: MetricsConfig::from_env(),
        }
    }
}

// Tests that modify environment variables must hold this lock
#[cfg(test)]
pub(crate) static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
