//! Security subsystem.
//!
//! Only `/metrics` is protected. A failed check is not an error: the handler
//! answers 404 whether credentials are absent, malformed or wrong.

pub mod basic_auth;

pub use basic_auth::{BasicCredentials, MetricsCredentials};
