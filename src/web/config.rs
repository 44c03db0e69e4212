use axum::http::StatusCode;
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::telemetry::SatelliteState;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub telemetry: TelemetryConfig,
    pub persistence: PersistenceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
    pub static_dir: PathBuf,
    pub empty_live_data: EmptyLiveData,
}

impl Default for WebConfig {
    fn default() -> Self {
        WebConfig {
            bind: "0.0.0.0:5000".to_string(),
            static_dir: PathBuf::from("src/web/static"),
            empty_live_data: EmptyLiveData::default(),
        }
    }
}

/// Status returned by `/live-data` before the first sample exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyLiveData {
    #[default]
    Ok,
    NotFound,
}

impl EmptyLiveData {
    pub fn status(self) -> StatusCode {
        match self {
            EmptyLiveData::Ok => StatusCode::OK,
            EmptyLiveData::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub capacity: usize,
    #[serde(deserialize_with = "deserialize_duration")]
    pub interval: Duration,
    /// Fixed RNG seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
    pub initial: SatelliteState,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        TelemetryConfig {
            capacity: 1000,
            interval: Duration::from_secs(5),
            seed: None,
            initial: SatelliteState::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum PersistenceConfig {
    #[default]
    None,
    File {
        path: PathBuf,
        #[serde(
            default = "default_persistence_timeout",
            deserialize_with = "deserialize_duration"
        )]
        timeout: Duration,
    },
}

fn default_persistence_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telemetry.capacity == 0 {
            return Err(ConfigError::Invalid("telemetry.capacity must be at least 1"));
        }
        if self.telemetry.interval.is_zero() {
            return Err(ConfigError::Invalid("telemetry.interval must be positive"));
        }
        Ok(())
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}
