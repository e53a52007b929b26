//! Domain records built fresh from provider payloads for a single tool call.

use chrono::{DateTime, NaiveDate, Utc};

/// A place resolved by geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One instantaneous observation (metric units).
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionSample {
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub condition: ConditionSample,
}

/// Forecast samples sharing one UTC calendar date, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub samples: Vec<ForecastSample>,
}

/// One active warning. Every field is optional on the wire; the renderer
/// substitutes placeholders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlertRecord {
    pub source: Option<String>,
    pub event: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub description: Option<String>,
}
