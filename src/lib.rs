//! APM demo web server library.
//!
//! A handful of routes instrumented with transaction naming and Prometheus
//! metrics, plus one proxied call to an external weather service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod weather;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
