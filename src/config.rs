use chrono::Duration;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::predict::DEFAULT_MAX_EPOCH_OFFSET;
use crate::telemetry::PathConfig;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::seconds(1);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    #[serde(
        default = "default_tick_interval",
        deserialize_with = "humantime_duration"
    )]
    pub tick_interval: Duration,
    #[serde(
        default = "default_max_epoch_offset",
        deserialize_with = "humantime_duration"
    )]
    pub max_epoch_offset: Duration,
    #[serde(default)]
    pub path: PathConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            max_epoch_offset: DEFAULT_MAX_EPOCH_OFFSET,
            path: PathConfig::default(),
        }
    }
}

fn default_tick_interval() -> Duration {
    DEFAULT_TICK_INTERVAL
}

fn default_max_epoch_offset() -> Duration {
    DEFAULT_MAX_EPOCH_OFFSET
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }
}

/// Parses a humantime string such as `1s`, `60s` or `30days`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| Duration::from_std(d).map_err(|e| e.to_string()))
}

pub(crate) fn humantime_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}
