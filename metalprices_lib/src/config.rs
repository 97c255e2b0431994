//! Service configuration read from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::convert::DEFAULT_USD_TO_INR_RATE;

pub const ENV_BASE_URL: &str = "GOLDAPI_BASE_URL";
pub const ENV_API_KEY: &str = "GOLDAPI_KEY";
pub const ENV_USD_TO_INR_RATE: &str = "USD_TO_INR_RATE";
pub const ENV_TIMEOUT_SECS: &str = "GOLDAPI_TIMEOUT_SECS";
pub const ENV_LISTEN: &str = "METALPRICES_LISTEN";
pub const ENV_DB: &str = "METALPRICES_DB";

const DEFAULT_LISTEN: &str = "0.0.0.0:8001";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors from reading configuration values.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration for the price service.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    /// Empty when unset; the upstream will then reject every request and
    /// all prices come from the fallback table.
    pub api_key: String,
    pub usd_to_inr_rate: f64,
    pub request_timeout: Duration,
    pub listen: SocketAddr,
    /// SQLite file for status checks; `None` keeps them in memory.
    pub database_path: Option<PathBuf>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let base_url = match get(ENV_BASE_URL) {
            Some(raw) => parse_base_url(&raw)?,
            None => goldapi_client::DEFAULT_BASE_URL.to_string(),
        };
        let api_key = get(ENV_API_KEY).unwrap_or_default();

        let usd_to_inr_rate = match get(ENV_USD_TO_INR_RATE) {
            Some(raw) => parse_positive_f64(ENV_USD_TO_INR_RATE, &raw)?,
            None => DEFAULT_USD_TO_INR_RATE,
        };

        let request_timeout = match get(ENV_TIMEOUT_SECS) {
            Some(raw) => Duration::from_secs(parse_positive_u64(ENV_TIMEOUT_SECS, &raw)?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let listen_raw = get(ENV_LISTEN).unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen = listen_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            key: ENV_LISTEN,
            value: listen_raw.clone(),
            reason: e.to_string(),
        })?;

        let database_path = get(ENV_DB).map(PathBuf::from);

        Ok(Self {
            base_url,
            api_key,
            usd_to_inr_rate,
            request_timeout,
            listen,
            database_path,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: goldapi_client::DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            usd_to_inr_rate: DEFAULT_USD_TO_INR_RATE,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            listen: ([0, 0, 0, 0], 8001).into(),
            database_path: None,
        }
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: ENV_BASE_URL,
        value: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    Ok(raw.to_string())
}

fn parse_positive_f64(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason,
    };
    let value = raw.parse::<f64>().map_err(|e| invalid(e.to_string()))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("must be a positive number".to_string()));
    }
    Ok(value)
}

fn parse_positive_u64(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason,
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero".to_string())),
        Ok(v) => Ok(v),
        Err(e) => Err(invalid(e.to_string())),
    }
}
