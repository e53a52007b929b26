use crate::{
    Config,
    provider::{
        openweather::OpenWeatherClient,
        payload::{OwCurrentResponse, OwForecastResponse, OwGeocodeEntry, OwOneCallResponse},
    },
};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;
pub mod payload;

/// Logical lookups issued against the provider, used to tag errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    Forecast,
    Geocode,
    Alerts,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Current => "current weather",
            Endpoint::Forecast => "forecast",
            Endpoint::Geocode => "geocoding",
            Endpoint::Alerts => "alerts",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network fault, unexpected status or an undecodable body.
    #[error("{endpoint} request failed: {message}")]
    Transport { endpoint: Endpoint, message: String },

    /// The provider answered HTTP 401 for the configured credential.
    #[error("{endpoint} request was rejected as unauthorized")]
    Auth { endpoint: Endpoint },

    /// No credential is configured; nothing was sent.
    #[error("{endpoint} request needs an API key, but none is configured")]
    MissingCredential { endpoint: Endpoint },
}

impl ProviderError {
    pub fn transport(endpoint: Endpoint, message: impl Into<String>) -> Self {
        ProviderError::Transport { endpoint, message: message.into() }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ProviderError::Auth { .. })
    }
}

/// One outbound request per lookup, no retries. Implementations must be
/// shareable across concurrent tool calls.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Whether a non-blank credential is available. Checked before any request.
    fn has_credential(&self) -> bool;

    async fn fetch_current(&self, city: &str) -> Result<OwCurrentResponse, ProviderError>;

    async fn fetch_forecast(&self, city: &str) -> Result<OwForecastResponse, ProviderError>;

    async fn geocode(&self, city: &str) -> Result<Vec<OwGeocodeEntry>, ProviderError>;

    async fn fetch_alerts(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<OwOneCallResponse, ProviderError>;
}

/// Construct the OpenWeatherMap client from resolved configuration.
///
/// A missing key is not an error here: the tools report it per call.
pub fn provider_from_config(config: &Config) -> OpenWeatherClient {
    let client = OpenWeatherClient::new(config.resolve_api_key());

    match config.resolve_base_url() {
        Some(base_url) => client.with_base_url(base_url),
        None => client,
    }
}
