//! Configuration management for Chronolog

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::{LedgerSettings, Severity};

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hours east of UTC used to stamp entries and name the log file
    #[serde(default)]
    pub time_zone_offset_hours: i32,

    /// Least urgent rank echoed to the console (1-8, default: 7 = INFO)
    #[serde(default = "default_max_print_level")]
    pub max_print_level: Severity,

    /// Least urgent rank written to the log file (1-8, default: 8 = DEBUG)
    #[serde(default = "default_max_output_level")]
    pub max_output_level: Severity,

    /// Program name, used to derive the log file name
    #[serde(default = "default_program_name")]
    pub program_name: String,

    /// Directory holding the log file
    #[serde(default = "default_folder_path")]
    pub folder_path: PathBuf,

    /// Echo entries to stdout at all
    #[serde(default = "default_console_enabled")]
    pub console_enabled: bool,

    /// Fixed file name inside `folder_path` instead of the derived one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

fn default_max_print_level() -> Severity {
    Severity::INFO
}

fn default_max_output_level() -> Severity {
    Severity::DEBUG
}

fn default_program_name() -> String {
    "chronolog".to_string()
}

fn default_folder_path() -> PathBuf {
    PathBuf::from("logs")
}

fn default_console_enabled() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_zone_offset_hours: 0,
            max_print_level: default_max_print_level(),
            max_output_level: default_max_output_level(),
            program_name: default_program_name(),
            folder_path: default_folder_path(),
            console_enabled: default_console_enabled(),
            file_name: None,
        }
    }
}

impl Config {
    /// Load configuration from the default file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific file, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// The configured UTC offset
    pub fn offset(&self) -> Result<FixedOffset> {
        self.time_zone_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .with_context(|| {
                format!(
                    "Time zone offset of {} hours is out of range",
                    self.time_zone_offset_hours
                )
            })
    }

    /// Log file path for a ledger started at `now`
    pub fn file_path_at(&self, now: DateTime<FixedOffset>) -> PathBuf {
        let name = match &self.file_name {
            Some(name) => name.clone(),
            None => format!(
                "{}_{}.log",
                self.program_name,
                now.format("%Y-%m-%d_%H-%M-%S")
            ),
        };
        self.folder_path.join(name)
    }

    /// Create the log folder and resolve settings for a new ledger
    pub fn prepare(&self) -> Result<LedgerSettings> {
        let offset = self.offset()?;

        std::fs::create_dir_all(&self.folder_path).context("Failed to create logs directory")?;

        let now = Utc::now().with_timezone(&offset);
        Ok(LedgerSettings {
            max_print_level: self.max_print_level,
            max_output_level: self.max_output_level,
            file_path: self.file_path_at(now),
            console_enabled: self.console_enabled,
            offset,
        })
    }
}

const CONFIG_DIR_NAME: &str = ".chronolog";

/// Directory searched by [`Config::load`]: `~/.chronolog`, or `./.chronolog`
/// when there is no home directory
pub fn config_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(CONFIG_DIR_NAME),
        None => {
            tracing::warn!("No home directory, reading logger config from ./{}", CONFIG_DIR_NAME);
            PathBuf::from(CONFIG_DIR_NAME)
        }
    }
}

/// `config.toml` inside [`config_dir`]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
