//! Outbound client for the weather service.

use axum::body::Bytes;
use thiserror::Error;
use url::Url;

use crate::config::WeatherConfig;

/// Errors raised while talking to the weather service.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Configured base URL could not be parsed.
    #[error("invalid weather base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Base URL cannot have a city appended to its path.
    #[error("weather base URL cannot carry a path: {0}")]
    CannotBeBase(String),

    /// Transport failure or non-success upstream status.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Thin wrapper around a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: Url,
    format: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(WeatherError::CannotBeBase(config.base_url.clone()));
        }

        let mut builder = reqwest::Client::builder();
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            format: config.format.clone(),
        })
    }

    /// Upstream URL for `city`, e.g. `https://wttr.in/london?format=3`.
    pub fn report_url(&self, city: &str) -> Result<Url, WeatherError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| WeatherError::CannotBeBase(self.base_url.to_string()))?
            .pop_if_empty()
            .push(city);
        url.query_pairs_mut().clear().append_pair("format", &self.format);
        Ok(url)
    }

    /// Fetch the one-line report for `city`.
    pub async fn fetch(&self, city: &str) -> Result<Bytes, WeatherError> {
        let url = self.report_url(city)?;
        tracing::debug!(url = %url, "Fetching weather report");

        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?)
    }
}
