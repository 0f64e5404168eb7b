//! Configuration loading and management
//!
//! Settings come from an optional YAML file, then environment variables
//! override individual fields:
//!
//! | Field             | Default          | Variable              |
//! |-------------------|------------------|-----------------------|
//! | `bind_address`    | `127.0.0.1:3000` | `PETAL_BIND_ADDRESS`  |
//! | `database_path`   | `db.json`        | `PETAL_DATABASE_PATH` |
//! | `log_level`       | `info`           | `PETAL_LOG_LEVEL`     |
//! | `cors_permissive` | `true`           |                       |
//!
//! The file itself is located with `--config <file>` or `PETAL_CONFIG`.

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Command line of the `petal-pos` binary
#[derive(Debug, Parser)]
#[command(name = "petal-pos", version)]
#[command(about = "Point-of-sale and inventory API over a JSON document")]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, env = "PETAL_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,

    /// Location of the JSON document
    pub database_path: PathBuf,

    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,

    /// Send permissive CORS headers
    pub cors_permissive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            database_path: PathBuf::from("db.json"),
            log_level: "info".to_string(),
            cors_permissive: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load configuration from a YAML string; missing fields keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply `PETAL_*` overrides read through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("PETAL_BIND_ADDRESS") {
            self.bind_address = addr;
        }
        if let Some(path) = lookup("PETAL_DATABASE_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(level) = lookup("PETAL_LOG_LEVEL") {
            self.log_level = level;
        }
        self
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration for the binary; without a file, defaults are used
    pub fn load(file: Option<PathBuf>) -> Result<Self> {
        let config = match file {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };

        Ok(config.with_env_overrides())
    }
}
