use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub postgres: PostgresConfig,
    pub dispatch: DispatchConfig,
    /// When set, the binary routes domain logging through the fast_log file
    /// adapter at this path instead of the console.
    pub log_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
}

/// Tunables for the dispatch state machine's default-window derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Hour of day a derived schedule window starts at when the caller
    /// supplies none (the board's historical 09:00 default).
    pub workday_start_hour: u32,
    /// Lower bound on a derived window's length in hours.
    pub min_window_hours: i64,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            postgres: PostgresConfig {
                host: "localhost".to_string(),
                port: 5432,
                database: "fieldops_app".to_string(),
                username: "postgres".to_string(),
                password: "password".to_string(),
                max_connections: 10,
            },
            dispatch: DispatchConfig::default(),
            log_file: None,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            workday_start_hour: 9,
            min_window_hours: 1,
        }
    }
}
