//! Global exception translation.
//!
//! Every handler returns `Result<_, AppError>`; the `IntoResponse` impl below
//! is the only place a failure becomes a response. Panics are funnelled through
//! the same path by `panic_response`.
//!
//! The 500 body is the raw error message, unsanitised. Acceptable for a demo;
//! a real service should not echo internal errors to clients.

use std::any::Any;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::weather::WeatherError;

/// Errors raised while handling a request.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller-facing argument problem, e.g. an unimplemented operation.
    #[error("{0}")]
    IllegalArgument(String),

    /// Upstream weather call failed.
    #[error(transparent)]
    Weather(#[from] WeatherError),

    /// Deferred task was cancelled or panicked.
    #[error("deferred task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Handler panicked.
    #[error("{0}")]
    Panic(String),
}

/// Renders an error followed by its `source()` chain.
struct Chain<'a>(&'a (dyn std::error::Error + 'static));

impl fmt::Display for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, chain = %Chain(&self), "Exception found");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// `CatchPanicLayer` callback.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::Panic(message).into_response()
}
