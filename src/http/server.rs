//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, panic translation)
//! - Attach the transaction naming hook and request metrics
//! - Bind server to listener and drain on shutdown

use axum::{
    body::Body,
    handler::Handler,
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultOnResponse, TraceLayer},
};

use crate::config::AppConfig;
use crate::http::error::panic_response;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::startup::StartupError;
use crate::observability::metrics::{track_requests, MetricsRegistry};
use crate::observability::tracing::{
    make_request_span, name_transaction, SpanTransactionNamer, TransactionNamer,
};
use crate::security::MetricsCredentials;
use crate::weather::WeatherClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<MetricsRegistry>,
    pub metrics_credentials: Arc<MetricsCredentials>,
    pub weather: WeatherClient,
    pub wait_delay: Duration,
    pub wait_result: Arc<str>,
}

impl AppState {
    /// Build handler state, including a fresh metrics registry.
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        Ok(Self {
            metrics: Arc::new(MetricsRegistry::new()),
            metrics_credentials: Arc::new(MetricsCredentials::from(&config.metrics)),
            weather: WeatherClient::new(&config.weather)?,
            wait_delay: Duration::from_millis(config.wait.delay_ms),
            wait_result: Arc::from(config.wait.result.as_str()),
        })
    }
}

/// HTTP server for the demo application.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    metrics: Arc<MetricsRegistry>,
}

impl HttpServer {
    /// Create a server whose transactions are named on the request span.
    pub fn new(config: AppConfig) -> Result<Self, StartupError> {
        Self::with_transaction_namer(config, Arc::new(SpanTransactionNamer))
    }

    /// Create a server with a custom transaction naming hook.
    pub fn with_transaction_namer(
        config: AppConfig,
        namer: Arc<dyn TransactionNamer>,
    ) -> Result<Self, StartupError> {
        let state = AppState::from_config(&config)?;
        let metrics = state.metrics.clone();

        let router = Self::layered(Self::routes(), state, namer);
        tracing::info!("Transaction naming hook attached");

        Ok(Self {
            router,
            config,
            metrics,
        })
    }

    fn routes() -> Router<AppState> {
        Router::new()
            .route("/", get(handlers::index))
            .route("/exception", get(handlers::exception))
            .route("/wait", get(handlers::wait))
            .route("/metrics", get(handlers::metrics))
            .route("/weather/{city}", get(handlers::weather))
    }

    /// Wrap `routes` with instrumentation, the fallback and all middleware layers.
    fn layered(
        routes: Router<AppState>,
        state: AppState,
        namer: Arc<dyn TransactionNamer>,
    ) -> Router {
        // route_layer skips the fallback, so it carries its own metrics layer.
        let not_found = handlers::not_found.layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            track_requests,
        ));

        routes
            // Last route_layer runs first: naming precedes metrics and the handler.
            .route_layer(middleware::from_fn_with_state(state.metrics.clone(), track_requests))
            .route_layer(middleware::from_fn_with_state(namer, name_transaction))
            .fallback(not_found)
            .with_state(state)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(propagate_request_id_layer())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_request_span::<Body>)
                    .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
            )
            .layer(set_request_id_layer())
    }

    /// Router with all layers, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The registry backing `/metrics`.
    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        self.metrics.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server until a shutdown signal arrives, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn panicking() -> &'static str {
        panic!("kaboom")
    }

    #[tokio::test]
    async fn test_panicking_route_is_translated_to_500() {
        let mut config = AppConfig::default();
        config.weather.use_system_proxy = false;
        let state = AppState::from_config(&config).unwrap();
        let metrics = state.metrics.clone();

        let routes = HttpServer::routes().route("/panic", get(panicking));
        let router = HttpServer::layered(routes, state, Arc::new(SpanTransactionNamer));

        let response = router
            .oneshot(Request::builder().uri("/panic").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key("x-request-id"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"kaboom");

        // The in-flight guard is released once the panicked request is dropped.
        let text = metrics.scrape();
        assert!(text.contains(r#"http_requests_in_flight{method="GET",path="/panic"} 0"#));
    }
}
