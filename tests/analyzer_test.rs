//! End-to-end tests over a directory of plain and gzipped logs

use nginx_logs::analyzer::{LogAnalyzer, ProcessOptions};
use nginx_logs::file_discovery::FileDiscovery;
use nginx_logs::{Date, DateCount};
use std::path::Path;

mod common;

fn options(dir: &Path, url: &str, by_date: bool, timezone: &str) -> ProcessOptions {
    ProcessOptions {
        url: url.to_string(),
        directory: dir.to_path_buf(),
        by_date,
        timezone: timezone.to_string(),
        json_output: false,
    }
}

fn day(y: i32, m: u32, d: u32, count: u64) -> DateCount {
    DateCount::new(Date::new(y, m, d).unwrap(), count)
}

#[test]
fn test_read_directory() -> anyhow::Result<()> {
    let temp_dir = common::setup_log_dir()?;
    let logs = FileDiscovery::default().read_directory(temp_dir.path())?;

    assert_eq!(logs.files_examined, 6);
    assert_eq!(
        logs.plain,
        vec![
            temp_dir.path().join("access.log"),
            temp_dir.path().join("access.log.1")
        ]
    );
    assert_eq!(logs.zipped, vec![temp_dir.path().join("access.log.2.gz")]);
    Ok(())
}

#[tokio::test]
async fn test_load_records_in_discovery_order() -> anyhow::Result<()> {
    let temp_dir = common::setup_log_dir()?;
    let analyzer = LogAnalyzer::default();
    let logs = FileDiscovery::default().read_directory(temp_dir.path())?;

    let records = analyzer.load_records(&logs).await?;
    assert_eq!(records.len(), 10 + 2 + 3);
    assert_eq!(records[0].ip, "41.227.38.172");
    assert_eq!(records[10].url, "/blog/");
    assert_eq!(records[11].url, "/about/");
    assert_eq!(records[14].url, "/blog/?page=2");
    Ok(())
}

#[tokio::test]
async fn test_total_count() -> anyhow::Result<()> {
    let temp_dir = common::setup_log_dir()?;
    let analyzer = LogAnalyzer::default();

    let counts = analyzer
        .analyze(&options(temp_dir.path(), "/blog/", false, "UTC"))
        .await?;
    assert_eq!(counts.total, 6);
    assert!(counts.daily.is_none());

    let counts = analyzer
        .analyze(&options(temp_dir.path(), "/nowhere", false, "UTC"))
        .await?;
    assert_eq!(counts.total, 0);
    Ok(())
}

#[tokio::test]
async fn test_daily_count_utc() -> anyhow::Result<()> {
    let temp_dir = common::setup_log_dir()?;
    let counts = LogAnalyzer::default()
        .analyze(&options(temp_dir.path(), "/blog/", true, "UTC"))
        .await?;

    let daily = counts.daily.expect("daily series");
    assert_eq!(counts.total, 6);
    assert_eq!(
        daily,
        vec![
            day(2013, 11, 14, 1),
            day(2013, 11, 15, 1),
            day(2013, 11, 16, 0),
            day(2013, 11, 17, 1),
            day(2013, 11, 18, 0),
            day(2013, 11, 19, 0),
            day(2013, 11, 20, 1),
            day(2013, 11, 21, 0),
            day(2013, 11, 22, 2),
        ]
    );
    assert_eq!(daily.iter().map(|d| d.count).sum::<u64>(), counts.total);
    Ok(())
}

#[tokio::test]
async fn test_daily_count_in_named_zone() -> anyhow::Result<()> {
    let temp_dir = common::setup_log_dir()?;
    let counts = LogAnalyzer::default()
        .analyze(&options(
            temp_dir.path(),
            "/blog/",
            true,
            "America/Los_Angeles",
        ))
        .await?;

    // Nov 15 02:45Z is still Nov 14 in Los Angeles
    let daily = counts.daily.expect("daily series");
    assert_eq!(daily.first(), Some(&day(2013, 11, 14, 2)));
    assert_eq!(daily[1], day(2013, 11, 15, 0));
    assert_eq!(daily.last(), Some(&day(2013, 11, 22, 2)));
    assert_eq!(daily.len(), 9);
    Ok(())
}

#[tokio::test]
async fn test_bad_timezone_rejected() -> anyhow::Result<()> {
    let temp_dir = common::setup_log_dir()?;
    let result = LogAnalyzer::default()
        .analyze(&options(temp_dir.path(), "/blog/", true, "Nowhere/Special"))
        .await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn test_malformed_file_fails_run() -> anyhow::Result<()> {
    let temp_dir = common::setup_log_dir()?;
    std::fs::write(
        temp_dir.path().join("access.log.3"),
        format!(
            "{}\n{}\n",
            common::log_line("/blog/", "23/Nov/2013:08:00:00 +0000"),
            "this line is not in the nginx format"
        ),
    )?;

    let err = LogAnalyzer::default()
        .analyze(&options(temp_dir.path(), "/blog/", false, "UTC"))
        .await
        .unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("access.log.3"), "{}", message);
    assert!(message.contains("line 1"), "{}", message);
    Ok(())
}

#[tokio::test]
async fn test_empty_directory() -> anyhow::Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let counts = LogAnalyzer::default()
        .analyze(&options(temp_dir.path(), "/blog/", true, "UTC"))
        .await?;
    assert_eq!(counts.total, 0);
    assert_eq!(counts.daily, Some(Vec::new()));
    Ok(())
}
