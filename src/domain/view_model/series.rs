//! Seven-day click time series.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::entities::ClickEvent;

/// Number of daily buckets in a series.
pub const SERIES_DAYS: usize = 7;

/// Click count for one UTC calendar day.
///
/// `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub count: u64,
}

impl DailyBucket {
    /// Axis label (`MM-DD`).
    pub fn label(&self) -> String {
        self.date.format("%m-%d").to_string()
    }
}

/// Buckets `events` by UTC day over the week ending on `now`'s UTC date.
///
/// Returns the days `today - 6 ..= today` in ascending order. Events outside
/// that window are counted but never looked up, so they appear nowhere;
/// days without events hold zero.
pub fn build_series(events: &[ClickEvent], now: DateTime<Utc>) -> [DailyBucket; SERIES_DAYS] {
    let mut counts: HashMap<NaiveDate, u64> = HashMap::new();
    for event in events {
        *counts.entry(event.timestamp.date_naive()).or_default() += 1;
    }

    let today = now.date_naive();

    std::array::from_fn(|index| {
        let days_back = (SERIES_DAYS - 1 - index) as u64;
        let date = today - Days::new(days_back);
        DailyBucket {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        }
    })
}
