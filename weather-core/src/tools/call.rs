//! Named-argument tool calls as delivered by an LLM runtime, and the
//! matching tool definitions.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use super::{DEFAULT_FORECAST_DAYS, WeatherTools};
use crate::provider::WeatherProvider;

/// `{"name": "<tool>", "arguments": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "arguments")]
pub enum ToolCall {
    GetCurrentWeather {
        city: String,
    },
    GetWeatherForecast {
        city: String,
        #[serde(default = "default_days")]
        days: i64,
    },
    GetWeatherAlerts {
        city: String,
    },
}

fn default_days() -> i64 {
    DEFAULT_FORECAST_DAYS
}

impl<P: WeatherProvider> WeatherTools<P> {
    pub async fn call(&self, call: ToolCall) -> String {
        match call {
            ToolCall::GetCurrentWeather { city } => self.get_current_weather(&city).await,
            ToolCall::GetWeatherForecast { city, days } => {
                self.get_weather_forecast(&city, days).await
            }
            ToolCall::GetWeatherAlerts { city } => self.get_weather_alerts(&city).await,
        }
    }

    /// Like [`WeatherTools::call`], but a malformed request is reported as text too.
    pub async fn call_json(&self, raw: &str) -> String {
        match serde_json::from_str::<ToolCall>(raw) {
            Ok(call) => self.call(call).await,
            Err(e) => {
                warn!(error = %e, "rejected malformed tool call");
                format!("Invalid tool call: {e}")
            }
        }
    }
}

/// Descriptors for the three tools in the JSON-schema shape LLM runtimes expect.
pub fn tool_definitions() -> Vec<Value> {
    let city = json!({
        "type": "string",
        "description": "City name, optionally with country code (e.g. \"London,GB\")"
    });

    vec![
        json!({
            "name": "GetCurrentWeather",
            "description": "Get current weather conditions for a city",
            "parameters": {
                "type": "object",
                "properties": { "city": city },
                "required": ["city"]
            }
        }),
        json!({
            "name": "GetWeatherForecast",
            "description": "Get a multi-day weather forecast (3-hour steps, up to 4 per day) for a city",
            "parameters": {
                "type": "object",
                "properties": {
                    "city": city,
                    "days": {
                        "type": "integer",
                        "description": "Number of days to forecast (1-5)",
                        "minimum": 1,
                        "maximum": 5,
                        "default": DEFAULT_FORECAST_DAYS
                    }
                },
                "required": ["city"]
            }
        }),
        json!({
            "name": "GetWeatherAlerts",
            "description": "Get active weather alerts for a city",
            "parameters": {
                "type": "object",
                "properties": { "city": city },
                "required": ["city"]
            }
        }),
    ]
}
