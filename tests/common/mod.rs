#![allow(dead_code)]

use anyhow::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

/// Ten lines in the default nginx format; `/blog/` is hit three times
pub const EXAMPLE_LOG: &str = include_str!("../fixtures/nginx_access_examples.log");

pub fn log_line(url: &str, timestamp: &str) -> String {
    format!(
        r#"10.1.2.3 - - [{}] "GET {} HTTP/1.1" 200 1024 "-" "Mozilla/5.0 (X11; Linux x86_64)""#,
        timestamp, url
    )
}

pub fn write_gzip(path: &Path, content: &str) -> Result<()> {
    let mut encoder = GzEncoder::new(fs::File::create(path)?, Compression::default());
    encoder.write_all(content.as_bytes())?;
    encoder.finish()?;
    Ok(())
}

/// A log directory with one current log, one rotated plain log, one rotated gzipped log and
/// a few files that are not access logs.
///
/// `/blog/` views (UTC): Nov 14 x1, Nov 15 x1, Nov 17 x1 from the current log,
/// Nov 20 x1 from access.log.1 and Nov 22 x2 from access.log.2.gz.
pub fn setup_log_dir() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path();

    fs::write(dir.join("access.log"), EXAMPLE_LOG)?;

    let rotated = [
        log_line("/blog/", "20/Nov/2013:10:00:00 +0000"),
        log_line("/about/", "20/Nov/2013:10:05:00 +0000"),
    ]
    .join("\n");
    fs::write(dir.join("access.log.1"), rotated + "\n")?;

    let zipped = [
        log_line("/blog/", "22/Nov/2013:08:00:00 +0000"),
        log_line("/blog/", "22/Nov/2013:21:30:00 +0000"),
        log_line("/blog/?page=2", "22/Nov/2013:21:31:00 +0000"),
    ]
    .join("\n");
    write_gzip(&dir.join("access.log.2.gz"), &(zipped + "\n"))?;

    fs::write(dir.join("error.log"), "2013/11/14 06:59:03 [error] 1234#0: not an access log\n")?;
    fs::write(dir.join("access.conf"), "log_format combined ...;\n")?;
    fs::create_dir(dir.join("access.d"))?;

    Ok(temp_dir)
}
