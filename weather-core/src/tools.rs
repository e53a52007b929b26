//! The three tool operations exposed to an LLM caller.
//!
//! Every operation returns a `String`: failures are classified as
//! [`ToolError`], logged once, and rendered as a message. Nothing escapes.

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    bucket::{MAX_FORECAST_DAYS, bucket_by_day},
    normalize::{Normalized, to_alert_records, to_condition_sample, to_forecast_samples, to_location},
    provider::{ProviderError, WeatherProvider},
    render::{render_alerts, render_current, render_forecast},
};

pub mod call;

pub use call::{ToolCall, tool_definitions};

pub const DEFAULT_FORECAST_DAYS: i64 = 3;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error(
        "Weather service is not configured: no OpenWeatherMap API key found. \
         Set the OPENWEATHER_API_KEY environment variable or run `weather-tools configure`."
    )]
    Config,

    #[error("{0}")]
    Validation(&'static str),

    #[error(
        "Could not retrieve weather data for '{city}'. \
         Please check the city name and try again."
    )]
    Transport {
        city: String,
        #[source]
        source: ProviderError,
    },

    #[error(
        "Weather alerts require an upgraded OpenWeatherMap subscription (One Call API 3.0); \
         the configured API key does not have access to alerts."
    )]
    AlertsUnavailable,

    #[error("No weather data available for '{city}'.")]
    NoData { city: String },

    #[error("No forecast data available for '{city}' in the requested period.")]
    NoForecast { city: String },

    #[error("Could not resolve location '{city}'. Please check the city name and try again.")]
    LocationNotFound { city: String },
}

impl ToolError {
    /// Informational outcomes are not failures and are logged at info level.
    pub fn is_informational(&self) -> bool {
        matches!(self, ToolError::NoData { .. } | ToolError::NoForecast { .. })
    }
}

pub const BLANK_CITY: &str = "City name must not be empty.";
pub const DAYS_OUT_OF_RANGE: &str = "Number of forecast days must be between 1 and 5.";

/// Orchestrates provider lookups, normalization, bucketing and rendering.
///
/// Holds no per-call state, so one instance serves concurrent calls.
#[derive(Debug, Clone)]
pub struct WeatherTools<P> {
    provider: P,
}

impl<P: WeatherProvider> WeatherTools<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    #[cfg(test)]
    pub(crate) fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn get_current_weather(&self, city: &str) -> String {
        report("GetCurrentWeather", city, self.current(city).await)
    }

    pub async fn get_weather_forecast(&self, city: &str, days: i64) -> String {
        let today = Utc::now().date_naive();
        report("GetWeatherForecast", city, self.forecast(city, days, today).await)
    }

    pub async fn get_weather_alerts(&self, city: &str) -> String {
        report("GetWeatherAlerts", city, self.alerts(city).await)
    }

    /// Credential first, then the city argument. No request is made on failure.
    fn precheck<'a>(&self, city: &'a str) -> Result<&'a str, ToolError> {
        if !self.provider.has_credential() {
            return Err(ToolError::Config);
        }

        let city = city.trim();
        if city.is_empty() {
            return Err(ToolError::Validation(BLANK_CITY));
        }

        Ok(city)
    }

    async fn current(&self, city: &str) -> Result<String, ToolError> {
        let city = self.precheck(city)?;

        let payload = self
            .provider
            .fetch_current(city)
            .await
            .map_err(|source| fetch_failed(city, source))?;

        match to_condition_sample(&payload) {
            Normalized::Data(sample) => Ok(render_current(display_name(&payload.name, city), &sample)),
            Normalized::NoData => Err(ToolError::NoData { city: city.to_string() }),
        }
    }

    pub(crate) async fn forecast(
        &self,
        city: &str,
        days: i64,
        reference_date: NaiveDate,
    ) -> Result<String, ToolError> {
        let city = self.precheck(city)?;

        let days = u32::try_from(days)
            .ok()
            .filter(|d| (1..=MAX_FORECAST_DAYS).contains(d))
            .ok_or(ToolError::Validation(DAYS_OUT_OF_RANGE))?;

        let payload = self
            .provider
            .fetch_forecast(city)
            .await
            .map_err(|source| fetch_failed(city, source))?;

        let samples = to_forecast_samples(&payload);
        let buckets = bucket_by_day(&samples, days, reference_date);
        debug!(city, samples = samples.len(), days = buckets.len(), "bucketed forecast");

        if buckets.is_empty() {
            return Err(ToolError::NoForecast { city: city.to_string() });
        }

        let resolved = payload.city.as_ref().map(|c| c.name.as_str()).unwrap_or_default();
        Ok(render_forecast(display_name(resolved, city), &buckets))
    }

    /// Geocode, then look up alerts at the resolved coordinates.
    async fn alerts(&self, city: &str) -> Result<String, ToolError> {
        let city = self.precheck(city)?;

        let matches = self
            .provider
            .geocode(city)
            .await
            .map_err(|source| fetch_failed(city, source))?;

        let location = matches
            .first()
            .map(to_location)
            .filter(|location| location.has_valid_coordinates())
            .ok_or_else(|| ToolError::LocationNotFound { city: city.to_string() })?;

        debug!(city, lat = location.latitude, lon = location.longitude, "resolved location");

        let payload = self
            .provider
            .fetch_alerts(location.latitude, location.longitude)
            .await
            .map_err(|source| match source {
                ProviderError::Auth { .. } => ToolError::AlertsUnavailable,
                source => fetch_failed(city, source),
            })?;

        let alerts = to_alert_records(&payload);
        if alerts.is_empty() {
            info!(city, "no active alerts");
        }

        Ok(render_alerts(display_name(&location.name, city), &alerts))
    }
}

fn fetch_failed(city: &str, source: ProviderError) -> ToolError {
    match source {
        ProviderError::MissingCredential { .. } => ToolError::Config,
        source => ToolError::Transport { city: city.to_string(), source },
    }
}

fn display_name<'a>(resolved: &'a str, requested: &'a str) -> &'a str {
    if resolved.trim().is_empty() { requested } else { resolved }
}

fn report(operation: &'static str, city: &str, result: Result<String, ToolError>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => {
            if err.is_informational() {
                info!(operation, city, "{err}");
            } else {
                warn!(operation, city, error = ?err, "tool call failed");
            }
            err.to_string()
        }
    }
}
