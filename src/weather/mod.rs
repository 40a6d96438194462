//! Weather proxy subsystem.
//!
//! # Data Flow
//! ```text
//! GET /weather/{city}
//!     → client.rs (template URL: {base}/{city}?format=3)
//!     → upstream GET, fresh every time
//!     → raw bytes back to the handler
//! ```
//!
//! # Design Decisions
//! - No retries, no caching, no timeout beyond the client defaults
//! - Non-success upstream statuses are errors, same as transport failures

pub mod client;

pub use client::{WeatherClient, WeatherError};
