//! Core library for the `weather-tools` binary.
//!
//! This crate defines:
//! - Configuration & credential resolution
//! - The provider abstraction and its OpenWeatherMap client
//! - Normalization, day bucketing and text rendering of weather data
//! - The three tool operations (current, forecast, alerts) and their call surface
//!
//! It is used by `weather-tools-cli`, but any LLM tool runtime can drive
//! [`WeatherTools`] directly.

pub mod bucket;
pub mod config;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod render;
pub mod tools;

pub use config::Config;
pub use model::{AlertRecord, ConditionSample, DailyBucket, ForecastSample, Location};
pub use provider::{
    Endpoint, ProviderError, WeatherProvider, openweather::OpenWeatherClient, provider_from_config,
};
pub use tools::{ToolCall, ToolError, WeatherTools, tool_definitions};
