//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the dispatch gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Render backend definitions.
    pub backends: Vec<BackendConfig>,

    /// Health check settings.
    pub health_check: HealthCheckConfig,

    /// Dispatch settings.
    pub dispatch: DispatchConfig,
}

/// One render backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Unique backend identifier for logs and metrics.
    pub name: String,

    /// Base URL of the backend API (e.g., "http://127.0.0.1:7860").
    pub address: String,
}

/// Health check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Enable the scheduled probe loop.
    pub enabled: bool,

    /// Probe interval in seconds.
    pub interval_secs: u64,

    /// Per-probe timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 60,
            timeout_secs: 5,
        }
    }
}

/// Dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Total per-render timeout in seconds.
    pub request_timeout_secs: u64,

    /// Fixed ledger cost of one job.
    pub job_cost: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 300,
            job_cost: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert!(config.backends.is_empty());
        assert!(config.health_check.enabled);
        assert_eq!(config.health_check.interval_secs, 60);
        assert_eq!(config.dispatch.request_timeout_secs, 300);
        assert_eq!(config.dispatch.job_cost, 100);
    }

    #[test]
    fn test_minimal_toml() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [[backends]]
            name = "sd-0"
            address = "http://127.0.0.1:7860"

            [dispatch]
            job_cost = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.backends.len(), 1);
        assert_eq!(config.backends[0].name, "sd-0");
        assert_eq!(config.dispatch.job_cost, 250);
        // Untouched sections keep their defaults.
        assert_eq!(config.health_check.interval_secs, 60);
        assert_eq!(config.dispatch.request_timeout_secs, 300);
    }
}
