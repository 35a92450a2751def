//! View Counting
//!
//! Counts the records that requested a URL, either as one total or as a dense series with
//! one entry per calendar day. Days are taken in the report timezone; the span between the
//! first and last day is measured on plain calendar dates so daylight saving changes in that
//! zone only decide which day a record lands on, never how many days the series has.

use crate::models::{Date, DateCount, Record};
use chrono::TimeZone;
use std::collections::HashMap;

/// Running view count per day
#[derive(Debug, Default, Clone)]
pub struct DateCounter {
    counts: HashMap<Date, u64>,
}

impl DateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, date: Date) {
        *self.counts.entry(date).or_insert(0) += 1;
    }

    /// Count for `date`, zero when nothing was recorded
    pub fn get(&self, date: Date) -> u64 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Every day from the earliest to the latest recorded date, in order, with missing days
    /// filled in as zero.
    pub fn range(&self) -> Vec<DateCount> {
        let (Some(min), Some(max)) = (self.counts.keys().min(), self.counts.keys().max()) else {
            return Vec::new();
        };
        if self.counts.len() == 1 {
            return vec![DateCount::new(*min, self.get(*min))];
        }

        let start = min.to_naive();
        let days = (max.to_naive() - start).num_days();

        start
            .iter_days()
            .take(days as usize + 1)
            .map(|day| {
                let date = Date::from_naive(day);
                DateCount::new(date, self.get(date))
            })
            .collect()
    }
}

fn matches(record: &Record, url: &str) -> bool {
    record.url == url
}

/// Number of records whose URL is exactly `url`
pub fn count(records: &[Record], url: &str) -> u64 {
    records.iter().filter(|r| matches(r, url)).count() as u64
}

/// Count the records for `url` per calendar day in `tz`.
///
/// Returns the total and the gap-filled daily series; the series sums to the total.
pub fn count_by_day<Tz: TimeZone>(records: &[Record], url: &str, tz: &Tz) -> (u64, Vec<DateCount>) {
    let mut by_day = DateCounter::new();
    let mut total = 0;
    for record in records.iter().filter(|r| matches(r, url)) {
        by_day.increment(Date::from_datetime(&record.timestamp.with_timezone(tz)));
        total += 1;
    }
    (total, by_day.range())
}
