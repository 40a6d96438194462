//! APM demo web server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ request id ──▶ trace span ──▶ route match ──▶ transaction name
//!                                                               │
//!                                                               ▼
//!                                                       metrics ──▶ handler
//!                                                                     │
//!   Client ◀── request id ◀── trace span ◀── error translation ◀──────┘
//!
//!   GET /                  fixed greeting
//!   GET /exception         always fails → 500
//!   GET /wait              deferred "done" after 20s
//!   GET /metrics           Prometheus text, basic auth, 404 otherwise
//!   GET /weather/{city}    proxied to wttr.in
//! ```

use std::path::PathBuf;

use apm_demo::config::loader::{load_config, render_config, ConfigError};
use apm_demo::config::validation::validate_config;
use apm_demo::config::AppConfig;
use apm_demo::lifecycle::{signals, startup, Shutdown};
use apm_demo::observability::logging;
use apm_demo::HttpServer;
use clap::Parser;

#[derive(Parser)]
#[command(name = "apm-demo")]
#[command(about = "Demo web server with transaction naming, metrics and a weather proxy", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability.log_level);

    tracing::info!("apm-demo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        wait_delay_ms = config.wait.delay_ms,
        weather_base_url = %config.weather.base_url,
        "Configuration loaded"
    );
    match render_config(&config) {
        Ok(rendered) => tracing::debug!("Effective configuration:\n{}", rendered),
        Err(e) => tracing::warn!(error = %e, "Could not render effective configuration"),
    }

    // Hook and router first, so nothing is accepted before naming is in place.
    let server = HttpServer::new(config.clone())?;
    let listener = startup::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
