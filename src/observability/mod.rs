//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every request produces:
//!     → tracing.rs (request span, transaction name)
//!     → metrics.rs (counters, gauges, latency summary)
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stdout (fmt subscriber)
//!     → /metrics (Prometheus scrape, basic-auth gated)
//! ```

pub mod logging;
pub mod metrics;
pub mod tracing;

pub use self::metrics::MetricsRegistry;
pub use self::tracing::{SpanTransactionNamer, TransactionNamer};
