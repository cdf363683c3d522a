use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use commute_core::app::CollectorSettings;
use commute_core::impls::{DEFAULT_ENDPOINT, Units};
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// Process configuration, read once at startup from `COMMUTE_*` variables.
#[derive(Deserialize, Serialize, Clone)]
pub struct CollectorConfig {
    /// Distance Matrix API key. Required for `run`.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub units: Units,

    /// IANA zone used for the morning/afternoon split.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,

    /// JSON array of locations.
    #[serde(default = "default_locations_path")]
    pub locations_path: PathBuf,

    /// JSON Lines file samples are appended to.
    #[serde(default = "default_samples_path")]
    pub samples_path: PathBuf,

    /// Unset means every pair is in flight at once.
    #[serde(default)]
    pub max_in_flight: Option<usize>,

    /// Per-request timeout in seconds; 0 disables it.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_time_zone() -> String {
    "America/Los_Angeles".to_string()
}

fn default_locations_path() -> PathBuf {
    PathBuf::from("locations.json")
}

fn default_samples_path() -> PathBuf {
    PathBuf::from("samples.jsonl")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CollectorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("COMMUTE"))
    }

    fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn time_zone(&self) -> Result<Tz> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("invalid COMMUTE_TIME_ZONE {:?}", self.time_zone))
    }

    pub fn settings(&self) -> Result<CollectorSettings> {
        if self.max_in_flight == Some(0) {
            return Err(anyhow!("COMMUTE_MAX_IN_FLIGHT must be at least 1"));
        }
        Ok(CollectorSettings {
            time_zone: self.time_zone()?,
            max_in_flight: self.max_in_flight,
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| anyhow!("COMMUTE_API_KEY is not set"))
    }
}

impl fmt::Debug for CollectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("units", &self.units)
            .field("time_zone", &self.time_zone)
            .field("locations_path", &self.locations_path)
            .field("samples_path", &self.samples_path)
            .field("max_in_flight", &self.max_in_flight)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
