//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the upstream client and router before accepting traffic
//! - Bind the listener; any failure here aborts the process
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners bind last (traffic only when ready)

use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;
use crate::weather::WeatherError;

/// Fatal errors raised before the server starts serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid bind address '{address}'")]
    InvalidAddress {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {address}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to set up weather client")]
    Weather(#[from] WeatherError),
}

/// Bind the TCP listener described by `config`.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .map_err(|source| StartupError::InvalidAddress {
            address: config.bind_address.clone(),
            source,
        })?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.bind_address.clone(),
            source,
        })?;

    tracing::info!(
        address = %listener.local_addr().unwrap_or(addr),
        "Listening for connections"
    );

    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind(&ListenerConfig {
            bind_address: "127.0.0.1:0".into(),
        })
        .await
        .unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_port_in_use_is_fatal_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = taken.local_addr().unwrap().to_string();

        let err = bind(&ListenerConfig {
            bind_address: address.clone(),
        })
        .await
        .unwrap_err();
        assert!(matches!(err, StartupError::Bind { address: ref a, .. } if *a == address));
    }

    #[tokio::test]
    async fn test_bind_rejects_bad_address() {
        let err = bind(&ListenerConfig {
            bind_address: "not-an-address".into(),
        })
        .await
        .unwrap_err();
        assert!(matches!(err, StartupError::InvalidAddress { .. }));
    }
}
