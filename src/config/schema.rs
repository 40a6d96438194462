//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the demo server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Credentials guarding the metrics endpoint.
    pub metrics: MetricsConfig,

    /// Artificially delayed endpoint settings.
    pub wait: WaitConfig,

    /// Weather proxy settings.
    pub weather: WeatherConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:7000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:7000".to_string(),
        }
    }
}

/// Basic-auth credentials accepted by `/metrics`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub username: String,
    pub password: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            username: "metrics".to_string(),
            password: "secret".to_string(),
        }
    }
}

/// Settings for the `/wait` endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Delay before the deferred result resolves, in milliseconds.
    pub delay_ms: u64,

    /// Value produced once the delay elapses.
    pub result: String,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            delay_ms: 20_000,
            result: "done".to_string(),
        }
    }
}

/// Upstream weather service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Base URL; the city is appended as a path segment.
    pub base_url: String,

    /// Value of the `format` query parameter.
    pub format: String,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wttr.in".to_string(),
            format: "3".to_string(),
            use_system_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
