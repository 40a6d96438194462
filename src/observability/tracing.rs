//! Request spans and transaction naming.
//!
//! # Responsibilities
//! - Create one span per request, carrying method, URI and request ID
//! - Name the in-flight transaction before the matched handler runs
//!
//! # Design Decisions
//! - The monitoring agent is an injected `TransactionNamer`, not global state
//! - Names use the matched route pattern, so `/weather/{city}` yields one
//!   stable name whatever the city
//! - Naming never influences routing or response content

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{self, Method},
    middleware::Next,
    response::Response,
};
use tracing::Span;

use crate::http::request::X_REQUEST_ID;

/// Hook invoked once per matched request, before its handler.
pub trait TransactionNamer: Send + Sync {
    fn name_transaction(&self, name: &str);
}

/// Records the transaction name on the current request span.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpanTransactionNamer;

impl TransactionNamer for SpanTransactionNamer {
    fn name_transaction(&self, name: &str) {
        Span::current().record("transaction", name);
        tracing::debug!(transaction = %name, "Transaction named");
    }
}

/// `"{METHOD} {pattern}"`, e.g. `GET /weather/{city}`.
pub fn transaction_name(method: &Method, matched_path: &str) -> String {
    format!("{} {}", method, matched_path)
}

/// Route-level middleware running the naming hook ahead of the handler.
pub async fn name_transaction(
    State(namer): State<Arc<dyn TransactionNamer>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(path) = request.extensions().get::<MatchedPath>() {
        namer.name_transaction(&transaction_name(request.method(), path.as_str()));
    }
    next.run(request).await
}

/// Span factory for `TraceLayer`.
pub fn make_request_span<B>(request: &http::Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
        transaction = tracing::field::Empty,
    )
}
