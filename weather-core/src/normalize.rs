//! Pure mappings from provider payloads to domain records.

use chrono::{DateTime, Utc};

use crate::{
    model::{AlertRecord, ConditionSample, ForecastSample, Location},
    provider::payload::{
        OwCurrentResponse, OwForecastResponse, OwGeocodeEntry, OwMain, OwOneCallResponse,
        OwWeather,
    },
};

/// Placeholder for a forecast point without a condition entry.
pub const UNKNOWN_CONDITION: &str = "unknown";

/// Result of normalizing a payload that may be well-formed but empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<T> {
    Data(T),
    NoData,
}

impl<T> Normalized<T> {
    #[cfg(test)]
    pub(crate) fn into_option(self) -> Option<T> {
        match self {
            Normalized::Data(value) => Some(value),
            Normalized::NoData => None,
        }
    }
}

pub fn to_location(entry: &OwGeocodeEntry) -> Location {
    Location {
        name: entry.name.clone(),
        latitude: entry.lat,
        longitude: entry.lon,
    }
}

/// `NoData` when the condition array is empty or the metrics block is absent.
pub fn to_condition_sample(payload: &OwCurrentResponse) -> Normalized<ConditionSample> {
    match (payload.weather.first(), payload.main.as_ref()) {
        (Some(weather), Some(main)) => Normalized::Data(condition(weather, main)),
        _ => Normalized::NoData,
    }
}

/// Keeps provider ordering. Points with an unrepresentable timestamp are skipped.
pub fn to_forecast_samples(payload: &OwForecastResponse) -> Vec<ForecastSample> {
    payload
        .list
        .iter()
        .filter_map(|entry| {
            let timestamp = unix_to_utc(entry.dt)?;
            let condition = match entry.weather.first() {
                Some(weather) => condition(weather, &entry.main),
                None => condition(
                    &OwWeather { description: UNKNOWN_CONDITION.to_string() },
                    &entry.main,
                ),
            };
            Some(ForecastSample { timestamp, condition })
        })
        .collect()
}

/// An absent `alerts` field means no active alerts, not a failure.
pub fn to_alert_records(payload: &OwOneCallResponse) -> Vec<AlertRecord> {
    payload
        .alerts
        .iter()
        .flatten()
        .map(|alert| AlertRecord {
            source: non_blank(alert.sender_name.as_deref()),
            event: non_blank(alert.event.as_deref()),
            start: alert.start.and_then(unix_to_utc),
            end: alert.end.and_then(unix_to_utc),
            description: non_blank(alert.description.as_deref()),
        })
        .collect()
}

fn condition(weather: &OwWeather, main: &OwMain) -> ConditionSample {
    ConditionSample {
        description: weather.description.clone(),
        temperature_c: main.temp,
        feels_like_c: main.feels_like,
        humidity_pct: main.humidity.round().clamp(0.0, 100.0) as u8,
        pressure_hpa: main.pressure.round().max(0.0) as u32,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn current(value: serde_json::Value) -> OwCurrentResponse {
        serde_json::from_value(value).expect("valid current payload")
    }

    #[test]
    fn full_current_payload_yields_data() {
        let payload = current(json!({
            "name": "London",
            "weather": [{ "description": "clear sky" }],
            "main": { "temp": 18.3, "feels_like": 17.9, "humidity": 60, "pressure": 1012 }
        }));

        let sample = to_condition_sample(&payload).into_option().expect("data");
        assert_eq!(sample.description, "clear sky");
        assert_eq!(sample.temperature_c, 18.3);
        assert_eq!(sample.feels_like_c, 17.9);
        assert_eq!(sample.humidity_pct, 60);
        assert_eq!(sample.pressure_hpa, 1012);
    }

    #[test]
    fn empty_weather_array_yields_no_data() {
        let payload = current(json!({
            "name": "London",
            "weather": [],
            "main": { "temp": 18.3, "feels_like": 17.9, "humidity": 60, "pressure": 1012 }
        }));

        assert_eq!(to_condition_sample(&payload), Normalized::NoData);
    }

    #[test]
    fn missing_main_block_yields_no_data() {
        let payload = current(json!({
            "name": "London",
            "weather": [{ "description": "clear sky" }]
        }));

        assert_eq!(to_condition_sample(&payload), Normalized::NoData);
    }

    #[test]
    fn humidity_is_clamped_to_percent_range() {
        let payload = current(json!({
            "weather": [{ "description": "mist" }],
            "main": { "temp": 1.0, "feels_like": 1.0, "humidity": 104.6, "pressure": 1000.4 }
        }));

        let sample = to_condition_sample(&payload).into_option().unwrap();
        assert_eq!(sample.humidity_pct, 100);
        assert_eq!(sample.pressure_hpa, 1000);
    }

    #[test]
    fn forecast_samples_keep_order_and_fill_missing_description() {
        let payload: OwForecastResponse = serde_json::from_value(json!({
            "list": [
                { "dt": 1_700_000_000, "main": { "temp": 1.0, "feels_like": 0.0, "humidity": 50, "pressure": 1000 },
                  "weather": [{ "description": "snow" }] },
                { "dt": 1_700_010_800, "main": { "temp": 2.0, "feels_like": 1.0, "humidity": 50, "pressure": 1000 },
                  "weather": [] }
            ],
            "city": { "name": "Oslo" }
        }))
        .unwrap();

        let samples = to_forecast_samples(&payload);
        assert_eq!(samples.len(), 2);
        assert!(samples[0].timestamp < samples[1].timestamp);
        assert_eq!(samples[0].condition.description, "snow");
        assert_eq!(samples[1].condition.description, UNKNOWN_CONDITION);
    }

    #[test]
    fn empty_forecast_list_yields_empty_sequence() {
        let payload: OwForecastResponse = serde_json::from_value(json!({ "list": [] })).unwrap();
        assert!(to_forecast_samples(&payload).is_empty());
    }

    #[test]
    fn geocode_entry_maps_to_location() {
        let entry = OwGeocodeEntry { name: "Paris".into(), lat: 48.8566, lon: 2.3522 };
        let location = to_location(&entry);

        assert_eq!(location.name, "Paris");
        assert!(location.has_valid_coordinates());
    }

    #[test]
    fn absent_alerts_field_is_empty_not_error() {
        let payload: OwOneCallResponse = serde_json::from_value(json!({})).unwrap();
        assert!(to_alert_records(&payload).is_empty());
    }

    #[test]
    fn alert_fields_are_mapped_and_blanks_dropped() {
        let payload: OwOneCallResponse = serde_json::from_value(json!({
            "alerts": [{
                "sender_name": "Met Office",
                "event": "Flood Warning",
                "start": 1_700_000_000,
                "end": 1_700_086_400,
                "description": "  "
            }]
        }))
        .unwrap();

        let alerts = to_alert_records(&payload);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].source.as_deref(), Some("Met Office"));
        assert_eq!(alerts[0].event.as_deref(), Some("Flood Warning"));
        assert_eq!(alerts[0].start.map(|t| t.timestamp()), Some(1_700_000_000));
        assert!(alerts[0].end > alerts[0].start);
        assert_eq!(alerts[0].description, None);
    }
}
