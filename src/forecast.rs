//! Seven-day forecast normalization.
//!
//! The model is asked for a forecast covering the next seven days, but replies
//! can skip days, repeat them, or wander outside the window. [`normalize`]
//! turns whatever came back into exactly one [`StressPoint`] per day.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{RawStressPoint, StressPoint, DATE_FORMAT};

/// Number of days covered by a forecast, starting at the anchor date.
pub const FORECAST_DAYS: usize = 7;

/// Stress level assigned to days the model did not forecast.
pub const DEFAULT_STRESS_LEVEL: f64 = 1.0;

/// Build the forecast for `today..today + 6` from a raw model reply.
///
/// Later entries for the same date replace earlier ones. Levels are emitted
/// unchanged, even outside 1..=10; missing days get [`DEFAULT_STRESS_LEVEL`];
/// entries outside the window are dropped.
pub fn normalize<I>(today: NaiveDate, raw: I) -> Vec<StressPoint>
where
    I: IntoIterator<Item = RawStressPoint>,
{
    let by_date: HashMap<String, f64> = raw
        .into_iter()
        .map(|point| (point.date, point.stress_level))
        .collect();

    today
        .iter_days()
        .take(FORECAST_DAYS)
        .map(|date| {
            let key = date.format(DATE_FORMAT).to_string();
            StressPoint {
                date,
                stress_level: by_date.get(&key).copied().unwrap_or(DEFAULT_STRESS_LEVEL),
            }
        })
        .collect()
}
