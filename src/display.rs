//! Output Formatting and Display Management
//!
//! Renders view counts either as human-readable terminal output with colors or as JSON for
//! programmatic consumption. Rendering returns a `String` so reports can be checked without
//! capturing stdout; the `display_*` methods print it.
//!
//! ## Output Formats
//!
//! ### Text
//! ```text
//! 3 Total Views
//!
//! February 27, 2014: 1
//! February 28, 2014: 0
//! March 1, 2014: 2
//! ```
//!
//! ### JSON
//! ```json
//! {
//!   "url": "/blog/",
//!   "total": 3,
//!   "daily": [
//!     { "date": "2014-02-27", "count": 1 },
//!     { "date": "2014-02-28", "count": 0 },
//!     { "date": "2014-03-01", "count": 2 }
//!   ]
//! }
//! ```

use crate::models::DateCount;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ViewReport<'a> {
    url: &'a str,
    total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    daily: Option<&'a [DateCount]>,
}

pub struct DisplayManager {
    json_pretty: bool,
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DisplayManager {
    pub fn new(json_pretty: bool) -> Self {
        Self { json_pretty }
    }

    fn to_json(&self, report: &ViewReport) -> Result<String> {
        let json = if self.json_pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        json.context("Error serializing report to JSON")
    }

    fn header(url: &str) -> String {
        format!(
            "\n{}\n{}\n{}\n",
            "=".repeat(80).bright_cyan(),
            format!("Page Views for {}", url).bright_white().bold(),
            "=".repeat(80).bright_cyan()
        )
    }

    pub fn render_total(&self, url: &str, total: u64, json_output: bool) -> Result<String> {
        if json_output {
            return self.to_json(&ViewReport {
                url,
                total,
                timezone: None,
                daily: None,
            });
        }

        Ok(format!(
            "{}\n{} Total Views\n",
            Self::header(url),
            total.to_string().bright_white().bold()
        ))
    }

    pub fn render_daily(
        &self,
        url: &str,
        timezone: &str,
        total: u64,
        daily: &[DateCount],
        json_output: bool,
    ) -> Result<String> {
        if json_output {
            return self.to_json(&ViewReport {
                url,
                total,
                timezone: Some(timezone),
                daily: Some(daily),
            });
        }

        let mut out = format!(
            "{}\n{} Total Views ({} days, {})\n\n",
            Self::header(url),
            total.to_string().bright_white().bold(),
            daily.len(),
            timezone.bright_blue()
        );
        for day in daily {
            let count = if day.count == 0 {
                day.count.to_string().dimmed()
            } else {
                day.count.to_string().bright_green()
            };
            out.push_str(&format!("{}: {}\n", day.date, count));
        }
        Ok(out)
    }

    pub fn display_total(&self, url: &str, total: u64, json_output: bool) -> Result<()> {
        println!("{}", self.render_total(url, total, json_output)?);
        Ok(())
    }

    pub fn display_daily(
        &self,
        url: &str,
        timezone: &str,
        total: u64,
        daily: &[DateCount],
        json_output: bool,
    ) -> Result<()> {
        println!(
            "{}",
            self.render_daily(url, timezone, total, daily, json_output)?
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Date;

    fn series() -> Vec<DateCount> {
        vec![
            DateCount::new(Date::new(2014, 2, 27).unwrap(), 1),
            DateCount::new(Date::new(2014, 2, 28).unwrap(), 0),
            DateCount::new(Date::new(2014, 3, 1).unwrap(), 2),
        ]
    }

    #[test]
    fn test_render_daily_text() {
        colored::control::set_override(false);
        let out = DisplayManager::default()
            .render_daily("/blog/", "UTC", 3, &series(), false)
            .unwrap();
        assert!(out.contains("3 Total Views"));
        assert!(out.contains("February 27, 2014: 1\n"));
        assert!(out.contains("February 28, 2014: 0\n"));
        assert!(out.contains("March 1, 2014: 2\n"));
    }

    #[test]
    fn test_render_daily_json() {
        let out = DisplayManager::new(false)
            .render_daily("/blog/", "UTC", 3, &series(), true)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["url"], "/blog/");
        assert_eq!(value["total"], 3);
        assert_eq!(value["timezone"], "UTC");
        assert_eq!(value["daily"][1]["date"], "2014-02-28");
        assert_eq!(value["daily"][1]["count"], 0);
    }

    #[test]
    fn test_render_total_json_omits_daily() {
        let out = DisplayManager::new(false)
            .render_total("/", 0, true)
            .unwrap();
        assert_eq!(out, r#"{"url":"/","total":0}"#);
    }
}
