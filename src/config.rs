//! Runtime configuration for the `photon` binary, read from the environment.
//!
//! Variables may also come from a `.env` file in the working directory.

use photon_client::error::{AppError, Result};
use photon_client::DEFAULT_BASE_URL;
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Output format of log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the Photon instance (`PHOTON_URL`).
    pub base_url: String,
    /// Request timeout (`PHOTON_TIMEOUT_SECS`).
    pub timeout: Duration,
    /// Log format (`PHOTON_LOG_FORMAT=json` for JSON lines).
    pub log_format: LogFormat,
}

impl Config {
    /// Loads `.env` (if any) and reads the configuration from the environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let base_url = env::var("PHOTON_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = match env::var("PHOTON_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    AppError::InvalidArgument(format!("PHOTON_TIMEOUT_SECS='{}': {}", raw, e))
                })?;
                Duration::from_secs(secs)
            },
            Err(env::VarError::NotPresent) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Err(e) => return Err(e.into()),
        };

        let log_format = match env::var("PHOTON_LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Plain,
        };

        Ok(Self {
            base_url,
            timeout,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("PHOTON_URL");
        env::remove_var("PHOTON_TIMEOUT_SECS");
        env::remove_var("PHOTON_LOG_FORMAT");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.log_format, LogFormat::Plain);
    }

    #[test]
    #[serial]
    fn test_values_from_env() {
        clear_env();
        env::set_var("PHOTON_URL", "http://localhost:2322/");
        env::set_var("PHOTON_TIMEOUT_SECS", "3");
        env::set_var("PHOTON_LOG_FORMAT", "JSON");

        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:2322/");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.log_format, LogFormat::Json);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout() {
        clear_env();
        env::set_var("PHOTON_TIMEOUT_SECS", "soon");

        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(msg) if msg.contains("PHOTON_TIMEOUT_SECS")));

        clear_env();
    }
}
