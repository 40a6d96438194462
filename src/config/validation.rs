//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value formats (socket addresses, URLs, log levels)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),

    #[error("metrics.username must not be empty")]
    EmptyMetricsUsername,

    #[error("metrics.username must not contain ':'")]
    MetricsUsernameColon,

    #[error("weather.base_url '{0}' is not a valid URL")]
    WeatherUrl(String),

    #[error("weather.base_url scheme '{0}' is not http or https")]
    WeatherScheme(String),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

/// Check the configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.metrics.username.is_empty() {
        errors.push(ValidationError::EmptyMetricsUsername);
    } else if config.metrics.username.contains(':') {
        // Basic auth splits on the first colon; such a name could never match.
        errors.push(ValidationError::MetricsUsernameColon);
    }

    match Url::parse(&config.weather.base_url) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::WeatherScheme(url.scheme().to_string()));
            }
        }
        Err(_) => errors.push(ValidationError::WeatherUrl(config.weather.base_url.clone())),
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
