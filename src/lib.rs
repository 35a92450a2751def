//! nginx-logs
//!
//! Counts how many requests in a set of nginx access logs hit a given URL, either as one total
//! or as a day-by-day series in a chosen timezone with empty days filled in as zero.
//!
//! ## Architecture Overview
//!
//! - [`models`] - [`Record`], [`Date`] and [`DateCount`]
//! - [`timestamp_parser`] - The fixed `[02/Jan/2006:15:04:05 -0700]` style timestamp
//! - [`parser`] - Line and stream parsing of the default `combined` log format
//! - [`aggregator`] - Flat and per-day view counting with gap-filling
//! - [`file_discovery`] - Finding plain and gzipped access logs in a directory
//! - [`analyzer`] - Orchestrates discovery, parsing, counting and display
//! - [`display`] - Text and JSON reports
//! - [`config`] - Configuration with file and environment variable support
//! - [`logging`] - Structured logging setup
//! - [`error`] - Parse error types
//!
//! ## Example
//!
//! ```rust
//! use nginx_logs::{aggregator, parser};
//!
//! let log = "\
//! 10.0.0.1 - - [27/Feb/2014:10:00:00 +0000] \"GET /blog/ HTTP/1.1\" 200 512 \"-\" \"curl/7.30.0\"
//! 10.0.0.2 - - [01/Mar/2014:11:30:00 +0000] \"GET /blog/ HTTP/1.1\" 200 512 \"-\" \"curl/7.30.0\"
//! ";
//! let records = parser::parse_reader(log.as_bytes()).unwrap();
//! let (total, daily) = aggregator::count_by_day(&records, "/blog/", &chrono::Utc);
//!
//! assert_eq!(total, 2);
//! assert_eq!(daily.len(), 3);
//! assert_eq!(daily[1].count, 0);
//! ```

pub mod aggregator;
pub mod analyzer;
pub mod config;
pub mod display;
pub mod error;
pub mod file_discovery;
pub mod logging;
pub mod models;
pub mod parser;
pub mod timestamp_parser;

pub use analyzer::LogAnalyzer;
pub use error::{FormatError, ParseError};
pub use models::*;
