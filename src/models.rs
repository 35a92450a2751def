//! Core Data Models
//!
//! This module defines the data structures shared by the parser, the aggregator and the
//! report display.
//!
//! ## Data Flow
//!
//! 1. **Raw Data**: [`Record`] - One parsed line of an nginx access log
//! 2. **Bucketing**: [`Date`] - The calendar day a record falls on in the report timezone
//! 3. **Output**: [`DateCount`] - One day of a gap-filled daily series
//!
//! ## Features
//!
//! - **Lossless re-serialization**: [`Record`] renders back to the canonical log line
//! - **Valid by construction**: a [`Date`] can only be built from a real calendar day
//! - **Serde Integration**: output types serialize for JSON reports

use crate::timestamp_parser::TimestampParser;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone};
use serde::{Serialize, Serializer};
use std::fmt;

/// One line of an nginx access log in the default `combined` layout:
///
/// `$remote_addr - $remote_user [$time_local] "$request" $status $body_bytes_sent "$http_referer" "$http_user_agent"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub ip: String,
    pub user: String,
    /// Instant with the offset written in the log, applied literally.
    pub timestamp: DateTime<FixedOffset>,
    /// The raw request line, e.g. `GET /index.html HTTP/1.1`
    pub request: String,
    pub method: String,
    pub url: String,
    pub version: String,
    pub status: i32,
    pub bytes: i64,
    pub referer: String,
    pub agent: String,
}

impl Record {
    /// True when the request line split into method, url and version.
    pub fn has_request_parts(&self) -> bool {
        !self.method.is_empty()
    }
}

fn dash_if_empty(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Rebuilds the record into the default nginx log format.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"{} - {} {} "{}" {} {} "{}" "{}""#,
            self.ip,
            self.user,
            TimestampParser::format(&self.timestamp),
            dash_if_empty(&self.request),
            self.status,
            self.bytes,
            dash_if_empty(&self.referer),
            dash_if_empty(&self.agent),
        )
    }
}

/// A calendar day with no time-of-day or zone component.
///
/// Ordered by year, then month, then day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    /// Returns `None` unless year/month/day name a real calendar day.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The day `dt` falls on in its own timezone.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self(dt.date_naive())
    }

    pub fn to_naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// ISO form, `YYYY-MM-DD`
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%B %-d, %Y"))
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.iso())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateCount {
    pub date: Date,
    pub count: u64,
}

impl DateCount {
    pub fn new(date: Date, count: u64) -> Self {
        Self { date, count }
    }
}
