//! Grouping of 3-hour forecast points into UTC calendar days.

use chrono::{Days, NaiveDate};

use crate::model::{DailyBucket, ForecastSample};

/// Provider horizon: five days at 3-hour resolution.
pub const MAX_FORECAST_DAYS: u32 = 5;

/// Display cap per day.
pub const SAMPLES_PER_DAY: usize = 4;

/// Groups `samples` by UTC date within `[reference_date, reference_date + requested_days)`.
///
/// Buckets follow first appearance of each date, which is ascending for
/// chronologically ordered input. At most `requested_days` buckets are
/// returned, each holding at most [`SAMPLES_PER_DAY`] samples.
///
/// `requested_days` must already be validated to `1..=MAX_FORECAST_DAYS`.
pub fn bucket_by_day(
    samples: &[ForecastSample],
    requested_days: u32,
    reference_date: NaiveDate,
) -> Vec<DailyBucket> {
    let window_end = reference_date.checked_add_days(Days::new(u64::from(requested_days)));

    let mut buckets: Vec<DailyBucket> = Vec::new();

    for sample in samples {
        let date = sample.timestamp.date_naive();
        let in_window = date >= reference_date && window_end.is_none_or(|end| date < end);
        if !in_window {
            continue;
        }

        match buckets.iter_mut().find(|bucket| bucket.date == date) {
            Some(bucket) => {
                if bucket.samples.len() < SAMPLES_PER_DAY {
                    bucket.samples.push(sample.clone());
                }
            }
            None => buckets.push(DailyBucket { date, samples: vec![sample.clone()] }),
        }
    }

    buckets.truncate(requested_days as usize);
    buckets
}
