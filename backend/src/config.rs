//! Configuration management
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! command-line flags (each flag can also come from a `DAYCARE_*` environment
//! variable).

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_DATABASE_URL: &str = "sqlite:daycare.db";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub cors_origin: String,
    /// Fallback tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000))),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Command-line interface of the daycare journal server
#[derive(Debug, Default, Parser)]
#[command(name = "daycare-backend", version, about = "Daycare attendance journal service")]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "DAYCARE_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database URL, e.g. sqlite:daycare.db
    #[arg(long, env = "DAYCARE_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to listen on, e.g. 127.0.0.1:3000
    #[arg(long, env = "DAYCARE_BIND")]
    pub bind: Option<SocketAddr>,

    /// Origin allowed to make cross-origin requests
    #[arg(long, env = "DAYCARE_CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "DAYCARE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Load config from a YAML file. Keys missing from the file keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Build the effective configuration from the command line
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        if let Some(database_url) = cli.database_url {
            config.database_url = database_url;
        }
        if let Some(bind) = cli.bind {
            config.bind_address = bind;
        }
        if let Some(cors_origin) = cli.cors_origin {
            config.cors_origin = cors_origin;
        }
        if let Some(log_level) = cli.log_level {
            config.log_level = log_level;
        }

        Ok(config)
    }
}
