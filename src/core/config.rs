//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Inventory configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default report format (plain, table, json, csv)
    pub format: Option<String>,

    /// Echo each accepted request as `+ <line>`
    pub echo: Option<bool>,

    /// Tracing filter directive, e.g. "debug" or "inventory=trace"
    pub log: Option<String>,
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid value '{value}' for {var}")]
    Env { var: &'static str, value: String },
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// `path` overrides the default user config location. A missing file is
    /// fine; an unreadable or malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. User config file (~/.config/inventory/config.yaml)
        let file = path.map(Path::to_path_buf).or_else(Self::global_config_path);
        if let Some(file) = file {
            if file.exists() {
                config.merge(Self::from_file(&file)?);
            }
        }

        // 3. Environment variables
        config.merge(Self::from_env(|var| std::env::var(var).ok())?);

        Ok(config)
    }

    /// Parse a single config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read the `INVENTORY_*` variables through `lookup`
    fn from_env<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let echo = match lookup("INVENTORY_ECHO") {
            Some(value) => Some(parse_bool(&value).ok_or(ConfigError::Env {
                var: "INVENTORY_ECHO",
                value,
            })?),
            None => None,
        };
        Ok(Config {
            format: lookup("INVENTORY_FORMAT"),
            echo,
            log: lookup("INVENTORY_LOG"),
        })
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "inventory")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.echo.is_some() {
            self.echo = other.echo;
        }
        if other.log.is_some() {
            self.log = other.log;
        }
    }

    /// Whether requests are echoed before they run
    pub fn echo(&self) -> bool {
        self.echo.unwrap_or(true)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
