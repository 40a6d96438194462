//! HTTP Basic authentication.
//!
//! # Responsibilities
//! - Parse `Authorization: Basic <base64(user:pass)>` headers
//! - Compare presented credentials against the configured pair
//!
//! # Design Decisions
//! - A malformed header is treated exactly like a missing one
//! - Comparison is plain, case-sensitive string equality on both halves

use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::MetricsConfig;

/// Username/password pair taken from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Extract credentials from the `Authorization` header, if present and well-formed.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        Self::parse(value)
    }

    /// Parse a raw `Authorization` header value.
    pub fn parse(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// The single credential pair allowed to read metrics.
#[derive(Debug, Clone)]
pub struct MetricsCredentials {
    username: String,
    password: String,
}

impl MetricsCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn accepts(&self, presented: &BasicCredentials) -> bool {
        presented.username == self.username && presented.password == self.password
    }
}

impl From<&MetricsConfig> for MetricsCredentials {
    fn from(config: &MetricsConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}
