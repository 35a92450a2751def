use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use glob::glob;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_FILE_PREFIX: &str = "access";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Plain,
    Gzip,
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogKind::Plain => write!(f, "plain"),
            LogKind::Gzip => write!(f, "gzipped"),
        }
    }
}

/// Access logs found in a directory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LogFiles {
    /// Every entry in the directory, matching or not
    pub files_examined: usize,
    pub plain: Vec<PathBuf>,
    pub zipped: Vec<PathBuf>,
}

impl LogFiles {
    /// Plain logs first, then gzipped ones
    pub fn iter(&self) -> impl Iterator<Item = (&Path, LogKind)> {
        self.plain
            .iter()
            .map(|p| (p.as_path(), LogKind::Plain))
            .chain(self.zipped.iter().map(|p| (p.as_path(), LogKind::Gzip)))
    }

    pub fn len(&self) -> usize {
        self.plain.len() + self.zipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify a file name: `access.log` and rotated `access.log.1` are plain,
/// `access.log.2.gz` is gzipped.
pub fn classify(name: &str, prefix: &str) -> Option<LogKind> {
    if !name.starts_with(prefix) {
        return None;
    }
    let lower = name.to_lowercase();
    let ext: Vec<&str> = lower.split('.').collect();
    let n = ext.len();
    if n < 2 {
        return None;
    }
    if ext[n - 1] == "log" || ext[n - 2] == "log" {
        Some(LogKind::Plain)
    } else if ext[n - 1] == "gz" {
        Some(LogKind::Gzip)
    } else {
        None
    }
}

/// Handles discovery of nginx access logs on disk
pub struct FileDiscovery {
    prefix: String,
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_PREFIX)
    }
}

impl FileDiscovery {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Scan `dir` (not recursively) for access logs
    pub fn read_directory(&self, dir: &Path) -> Result<LogFiles> {
        let mut logs = LogFiles {
            files_examined: std::fs::read_dir(dir)
                .with_context(|| format!("Error while reading directory {}", dir.display()))?
                .count(),
            ..LogFiles::default()
        };

        let pattern = PathBuf::from(glob::Pattern::escape(&dir.to_string_lossy()))
            .join(format!("{}*", glob::Pattern::escape(&self.prefix)));
        let paths = glob(&pattern.to_string_lossy())
            .with_context(|| format!("Invalid search pattern {}", pattern.display()))?;

        for path in paths.flatten() {
            if path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            match classify(name, &self.prefix) {
                Some(LogKind::Plain) => logs.plain.push(path),
                Some(LogKind::Gzip) => logs.zipped.push(path),
                None => debug!(file = %path.display(), "Skipping non-log file"),
            }
        }

        logs.plain.sort();
        logs.zipped.sort();
        Ok(logs)
    }
}

/// Open a log for reading, decompressing gzipped files on the fly
pub fn open_log(path: &Path, kind: LogKind) -> Result<Box<dyn Read + Send>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    Ok(match kind {
        LogKind::Plain => Box::new(reader),
        LogKind::Gzip => Box::new(GzDecoder::new(reader)),
    })
}
