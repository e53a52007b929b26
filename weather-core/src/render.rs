//! Fixed-format text reports returned to the tool caller.
//!
//! Rendering is pure and infallible; absent optional fields are replaced by
//! placeholders.

use chrono::{DateTime, Utc};

use crate::model::{AlertRecord, ConditionSample, DailyBucket};

const PLACEHOLDER: &str = "n/a";

pub fn render_current(city: &str, sample: &ConditionSample) -> String {
    format!(
        "Current weather in {}: {}, temperature {:.1}°C (feels like {:.1}°C), humidity {}%, pressure {} hPa",
        city,
        or_placeholder(&sample.description),
        sample.temperature_c,
        sample.feels_like_c,
        sample.humidity_pct,
        sample.pressure_hpa,
    )
}

/// A header line, then one block per day separated by a blank line.
pub fn render_forecast(city: &str, buckets: &[DailyBucket]) -> String {
    let blocks: Vec<String> = buckets
        .iter()
        .map(|bucket| {
            let mut block = bucket.date.format("%A, %B %-d, %Y").to_string();
            for sample in &bucket.samples {
                block.push_str(&format!(
                    "\n  {}: {}, {:.1}°C (feels like {:.1}°C)",
                    sample.timestamp.format("%H:%M"),
                    or_placeholder(&sample.condition.description),
                    sample.condition.temperature_c,
                    sample.condition.feels_like_c,
                ));
            }
            block
        })
        .collect();

    format!("Weather forecast for {}:\n\n{}", city, blocks.join("\n\n"))
}

pub fn render_alerts(city: &str, alerts: &[AlertRecord]) -> String {
    if alerts.is_empty() {
        return format!("No active weather alerts for {city}.");
    }

    let blocks: Vec<String> = alerts
        .iter()
        .map(|alert| {
            format!(
                "{}\n  From: {}\n  Until: {}\n  Source: {}\n  {}",
                alert.event.as_deref().unwrap_or("Weather alert"),
                instant(alert.start),
                instant(alert.end),
                alert.source.as_deref().unwrap_or(PLACEHOLDER),
                alert.description.as_deref().unwrap_or("No description provided."),
            )
        })
        .collect();

    format!("Active weather alerts for {}:\n\n{}", city, blocks.join("\n\n"))
}

fn instant(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() { PLACEHOLDER } else { value }
}
