//! View Analysis Engine
//!
//! Coordinates one run of the tool:
//!
//! 1. **Discovery**: find `access*` logs in the input directory
//! 2. **Parsing**: parse every file, each on its own blocking task
//! 3. **Aggregation**: count views for the URL, in total or per day
//! 4. **Reporting**: hand the counts to the [`DisplayManager`]
//!
//! Files are parsed concurrently but concatenated in discovery order (plain logs first, then
//! gzipped ones). A malformed line in any file fails the whole run with that file's path and
//! the line index; counts never silently skip data.

use crate::aggregator;
use crate::config::resolve_timezone;
use crate::display::DisplayManager;
use crate::file_discovery::{FileDiscovery, LogFiles};
use crate::logging::run_span;
use crate::models::{DateCount, Record};
use crate::parser::FileParser;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn, Instrument};

#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub url: String,
    pub directory: PathBuf,
    pub by_date: bool,
    /// IANA zone name, e.g. `America/Los_Angeles`
    pub timezone: String,
    pub json_output: bool,
}

/// Result of one analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCounts {
    pub total: u64,
    /// Present when counting by day
    pub daily: Option<Vec<DateCount>>,
}

pub struct LogAnalyzer {
    discovery: FileDiscovery,
    display_manager: DisplayManager,
}

impl Default for LogAnalyzer {
    fn default() -> Self {
        Self::new(FileDiscovery::default(), DisplayManager::default())
    }
}

impl LogAnalyzer {
    pub fn new(discovery: FileDiscovery, display_manager: DisplayManager) -> Self {
        Self {
            discovery,
            display_manager,
        }
    }

    /// Parse every discovered file and concatenate the records in discovery order
    pub async fn load_records(&self, logs: &LogFiles) -> Result<Vec<Record>> {
        let tasks = logs.iter().map(|(path, kind)| {
            let path = path.to_path_buf();
            tokio::task::spawn_blocking(move || FileParser::new().parse_file(&path, kind))
        });
        let results = futures::future::try_join_all(tasks)
            .await
            .context("Log parsing task failed")?;

        let mut records = Vec::new();
        for result in results {
            records.extend(result?);
        }
        Ok(records)
    }

    /// Discover, parse and count without printing anything
    pub async fn analyze(&self, options: &ProcessOptions) -> Result<ViewCounts> {
        // Reject a bad zone before doing any work
        let tz = resolve_timezone(&options.timezone)?;

        let logs = self.discovery.read_directory(&options.directory)?;
        info!(files = logs.files_examined, "Files examined");
        info!(plain = logs.plain.len(), gzipped = logs.zipped.len(), "Access logs found");
        if logs.is_empty() {
            warn!(directory = %options.directory.display(), "No access logs found");
        }

        let records = self.load_records(&logs).await?;
        info!(records = records.len(), "Total records parsed");

        if options.by_date {
            let (total, daily) = aggregator::count_by_day(&records, &options.url, &tz);
            Ok(ViewCounts {
                total,
                daily: Some(daily),
            })
        } else {
            Ok(ViewCounts {
                total: aggregator::count(&records, &options.url),
                daily: None,
            })
        }
    }

    pub async fn run(&self, options: &ProcessOptions) -> Result<()> {
        let span = run_span(&options.url);
        let counts = self.analyze(options).instrument(span).await?;

        match &counts.daily {
            Some(daily) => self.display_manager.display_daily(
                &options.url,
                &options.timezone,
                counts.total,
                daily,
                options.json_output,
            ),
            None => self
                .display_manager
                .display_total(&options.url, counts.total, options.json_output),
        }
    }
}
