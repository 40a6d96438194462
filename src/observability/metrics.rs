//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Own the process-wide Prometheus registry
//! - Instrument every request, matched or not
//! - Render a text snapshot for `/metrics`
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, path, counted on arrival
//! - `http_responses_total` (counter): completed requests by method, path, status
//! - `http_request_duration_seconds` (summary): latency distribution
//! - `http_requests_in_flight` (gauge): requests currently being handled
//! - `process_uptime_seconds` (gauge): refreshed on every scrape
//!
//! # Design Decisions
//! - The recorder is owned by `MetricsRegistry` rather than installed globally,
//!   so each server instance (and each test) gets its own registry
//! - Labels use the matched path pattern, never the raw URL; unmatched
//!   requests share the `NOT_FOUND` label

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use metrics::{Gauge, Key, KeyName, Label, Level, Metadata, Recorder, SharedString, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const RESPONSES_TOTAL: &str = "http_responses_total";
pub const REQUEST_DURATION: &str = "http_request_duration_seconds";
pub const REQUESTS_IN_FLIGHT: &str = "http_requests_in_flight";
pub const PROCESS_UPTIME: &str = "process_uptime_seconds";

/// Path label for requests no route matched.
pub const NOT_FOUND_PATH: &str = "NOT_FOUND";

fn metadata() -> Metadata<'static> {
    Metadata::new(module_path!(), Level::INFO, Some(module_path!()))
}

/// Process-wide metrics state, created once at startup.
pub struct MetricsRegistry {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
    started_at: Instant,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        recorder.describe_counter(
            KeyName::from(REQUESTS_TOTAL),
            None,
            SharedString::from("Total HTTP requests received"),
        );
        recorder.describe_counter(
            KeyName::from(RESPONSES_TOTAL),
            None,
            SharedString::from("Total HTTP responses sent, by status"),
        );
        recorder.describe_histogram(
            KeyName::from(REQUEST_DURATION),
            Some(Unit::Seconds),
            SharedString::from("HTTP request latency"),
        );
        recorder.describe_gauge(
            KeyName::from(REQUESTS_IN_FLIGHT),
            None,
            SharedString::from("HTTP requests currently in flight"),
        );
        recorder.describe_gauge(
            KeyName::from(PROCESS_UPTIME),
            Some(Unit::Seconds),
            SharedString::from("Seconds since the registry was created"),
        );

        Self {
            recorder,
            handle,
            started_at: Instant::now(),
        }
    }

    /// Count an arriving request and mark it in flight until the guard drops.
    ///
    /// Counting on arrival means a scrape always sees its own request.
    pub fn begin_request(&self, method: &str, path: &str) -> InFlightGuard {
        let labels = vec![
            Label::new("method", method.to_string()),
            Label::new("path", path.to_string()),
        ];

        self.recorder
            .register_counter(&Key::from_parts(REQUESTS_TOTAL, labels.clone()), &metadata())
            .increment(1);

        let gauge = self
            .recorder
            .register_gauge(&Key::from_parts(REQUESTS_IN_FLIGHT, labels), &metadata());
        gauge.increment(1.0);
        InFlightGuard { gauge }
    }

    /// Record a completed request.
    pub fn record_response(&self, method: &str, path: &str, status: u16, start: Instant) {
        let labels = vec![
            Label::new("method", method.to_string()),
            Label::new("path", path.to_string()),
            Label::new("status", status.to_string()),
        ];

        self.recorder
            .register_counter(&Key::from_parts(RESPONSES_TOTAL, labels.clone()), &metadata())
            .increment(1);
        self.recorder
            .register_histogram(&Key::from_parts(REQUEST_DURATION, labels), &metadata())
            .record(start.elapsed().as_secs_f64());
    }

    /// Point-in-time Prometheus text snapshot of every tracked metric.
    pub fn scrape(&self) -> String {
        self.recorder
            .register_gauge(&Key::from_name(PROCESS_UPTIME), &metadata())
            .set(self.started_at.elapsed().as_secs_f64());
        self.handle.render()
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Decrements the in-flight gauge on drop, including on unwind.
pub struct InFlightGuard {
    gauge: Gauge,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.decrement(1.0);
    }
}

/// Middleware recording request count, latency and in-flight gauge.
///
/// Installed on every route and on the fallback; requests without a matched
/// path are labelled `NOT_FOUND`.
pub async fn track_requests(
    State(registry): State<Arc<MetricsRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| NOT_FOUND_PATH.to_string());

    let start = Instant::now();
    let _in_flight = registry.begin_request(&method, &path);

    let response = next.run(request).await;

    registry.record_response(&method, &path, response.status().as_u16(), start);
    response
}
