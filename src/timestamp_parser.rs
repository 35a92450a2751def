use chrono::{DateTime, FixedOffset, ParseResult, Utc};

/// The default nginx `$time_local` layout, brackets included.
pub const NGINX_TIME_LAYOUT: &str = "[%d/%b/%Y:%H:%M:%S %z]";

/// Handles the fixed timestamp format used by nginx access logs
pub struct TimestampParser;

impl TimestampParser {
    /// Parse a bracketed nginx timestamp, e.g. `[14/Nov/2013:06:59:03 +0000]`.
    ///
    /// The numeric offset is applied as written; no zone database is consulted.
    pub fn parse(timestamp_str: &str) -> ParseResult<DateTime<FixedOffset>> {
        DateTime::parse_from_str(timestamp_str, NGINX_TIME_LAYOUT)
    }

    /// Parse and project onto UTC
    pub fn parse_utc(timestamp_str: &str) -> ParseResult<DateTime<Utc>> {
        Self::parse(timestamp_str).map(|dt| dt.with_timezone(&Utc))
    }

    /// Render back to the nginx layout, keeping the original offset.
    pub fn format(timestamp: &DateTime<FixedOffset>) -> String {
        timestamp.format(NGINX_TIME_LAYOUT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_utc_offset() {
        let result = TimestampParser::parse_utc("[14/Nov/2013:06:59:03 +0000]").unwrap();
        assert_eq!(result, Utc.with_ymd_and_hms(2013, 11, 14, 6, 59, 3).unwrap());
    }

    #[test]
    fn test_parse_keeps_literal_offset() {
        let result = TimestampParser::parse("[01/Mar/2014:00:00:00 -0800]").unwrap();
        assert_eq!(result.offset().local_minus_utc(), -8 * 3600);
        assert_eq!(
            result.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2014, 3, 1, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_format_round_trip() {
        for ts in [
            "[14/Nov/2013:06:59:03 +0000]",
            "[01/Mar/2014:00:00:00 -0800]",
            "[29/Feb/2016:23:15:42 +0530]",
        ] {
            let parsed = TimestampParser::parse(ts).unwrap();
            assert_eq!(TimestampParser::format(&parsed), ts);
        }
    }

    #[test]
    fn test_parse_missing_brackets() {
        assert!(TimestampParser::parse("14/Nov/2013:06:59:03 +0000").is_err());
    }

    #[test]
    fn test_parse_missing_offset() {
        assert!(TimestampParser::parse("[14/Nov/2013:06:59:03]").is_err());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(TimestampParser::parse("invalid").is_err());
    }
}
