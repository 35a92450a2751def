//! Configuration system
//!
//! Provides centralized configuration management with:
//! - Environment variable support
//! - Config file loading (optional, `basic` feature)
//! - Runtime defaults
//! - Validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
#[cfg(feature = "basic")]
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;
#[cfg(feature = "basic")]
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Where access logs are looked for
    pub input: InputConfig,

    /// Report configuration
    pub report: ReportConfig,

    /// Paths configuration
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub directory: PathBuf,
    pub file_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// IANA zone name days are counted in
    pub timezone: String,
    pub json_pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub log_directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "WARN".to_string(),
            format: "pretty".to_string(),
            output: "console".to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_prefix: crate::file_discovery::DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            json_pretty: true,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            log_directory: PathBuf::from("logs"),
        }
    }
}

impl Config {
    /// Load configuration from environment, file, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        #[cfg(feature = "basic")]
        {
            let config_paths = [
                PathBuf::from("nginx-logs.toml"),
                PathBuf::from(".nginx-logs.toml"),
                dirs::config_dir()
                    .map(|d| d.join("nginx-logs").join("config.toml"))
                    .unwrap_or_default(),
            ];

            for path in &config_paths {
                if path.is_file() {
                    info!(config_file = %path.display(), "Loading configuration from file");
                    config = Self::load_from_file(path)?;
                    break;
                }
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    #[cfg(feature = "basic")]
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        // Logging overrides
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        // Input overrides
        if let Ok(val) = env::var("NGINX_LOGS_DIR") {
            self.input.directory = PathBuf::from(val);
        }
        if let Ok(val) = env::var("NGINX_LOGS_PREFIX") {
            self.input.file_prefix = val;
        }

        // Report overrides
        if let Ok(val) = env::var("NGINX_LOGS_TZ") {
            self.report.timezone = val;
        }

        // Path overrides
        if let Ok(val) = env::var("NGINX_LOGS_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            anyhow::bail!(
                "Log format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            );
        }

        if !matches!(self.logging.output.as_str(), "console" | "file" | "both") {
            anyhow::bail!(
                "Log output must be 'console', 'file' or 'both', got '{}'",
                self.logging.output
            );
        }

        if self.input.file_prefix.is_empty() {
            anyhow::bail!("Log file prefix cannot be empty");
        }

        resolve_timezone(&self.report.timezone)
            .context("Invalid report timezone in configuration")?;

        Ok(())
    }

    /// Save current configuration to file
    #[cfg(feature = "basic")]
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!(path = %path.display(), "Configuration saved to file");

        Ok(())
    }
}

/// Resolve an IANA zone name such as `America/Los_Angeles`.
pub fn resolve_timezone(name: &str) -> Result<chrono_tz::Tz> {
    name.parse::<chrono_tz::Tz>()
        .map_err(|e| anyhow::anyhow!("Error while loading timezone {}: {}", name, e))
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance, loading it on first use
pub fn get_config() -> Result<&'static Config> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let config = Config::load()?;
    Ok(CONFIG.get_or_init(|| config))
}
