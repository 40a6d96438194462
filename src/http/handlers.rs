//! Route handlers.

use axum::{
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::error::AppError;
use crate::http::server::AppState;
use crate::security::BasicCredentials;

pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
pub const WEATHER_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// `GET /`
pub async fn index() -> &'static str {
    tracing::info!("This is an informative logging message");
    "Appsolutely perfect"
}

/// `GET /exception`
pub async fn exception() -> Result<&'static str, AppError> {
    Err(AppError::IllegalArgument("not yet implemented".to_string()))
}

/// `GET /wait`
///
/// The delayed value is produced by a spawned task, so it resolves even if
/// the client goes away; the request itself only awaits the handle.
pub async fn wait(State(state): State<AppState>) -> Result<String, AppError> {
    let delay = state.wait_delay;
    let value = state.wait_result.clone();

    let deferred = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        value.to_string()
    });

    Ok(deferred.await?)
}

/// `GET /metrics`
///
/// 404 unless the request carries exactly the configured credentials.
pub async fn metrics(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let authorized = BasicCredentials::from_headers(&headers)
        .is_some_and(|presented| state.metrics_credentials.accepts(&presented));

    if !authorized {
        return StatusCode::NOT_FOUND.into_response();
    }

    ([(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], state.metrics.scrape()).into_response()
}

/// `GET /weather/{city}`
pub async fn weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Response, AppError> {
    let report = state.weather.fetch(&city).await?;
    Ok(([(CONTENT_TYPE, WEATHER_CONTENT_TYPE)], report).into_response())
}

/// Fallback for unmatched routes: plain 404, empty body.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
