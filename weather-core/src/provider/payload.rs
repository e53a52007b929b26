//! Wire schemas of the four OpenWeatherMap payloads consumed by the tools.
//!
//! Only the fields the tools read are modelled; everything else is ignored.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct OwMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwWeather {
    #[serde(default)]
    pub description: String,
}

/// `GET /data/2.5/weather?q=<city>`
#[derive(Debug, Clone, Deserialize)]
pub struct OwCurrentResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub main: Option<OwMain>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwCity {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastEntry {
    /// Unix seconds.
    pub dt: i64,
    pub main: OwMain,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
}

/// `GET /data/2.5/forecast?q=<city>`, 3-hour steps over 5 days.
#[derive(Debug, Clone, Deserialize)]
pub struct OwForecastResponse {
    #[serde(default)]
    pub list: Vec<OwForecastEntry>,
    pub city: Option<OwCity>,
}

/// One element of `GET /geo/1.0/direct?q=<city>`.
#[derive(Debug, Clone, Deserialize)]
pub struct OwGeocodeEntry {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwAlert {
    pub sender_name: Option<String>,
    pub event: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub description: Option<String>,
}

/// `GET /data/3.0/onecall?lat=..&lon=..`; `alerts` is omitted when none are active.
#[derive(Debug, Clone, Deserialize)]
pub struct OwOneCallResponse {
    pub alerts: Option<Vec<OwAlert>>,
}
