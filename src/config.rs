//! Application configuration loaded from environment variables.
//!
//! Everything is read once at session start and cached in the [`Config`]
//! struct; no component reads the environment after that.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Deadline applied to every backend fetch.
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;
/// Attempts for backend writes (creates/updates). Reads are never retried.
const DEFAULT_WRITE_ATTEMPTS: u32 = 3;
/// Fixed backoff between write attempts.
const DEFAULT_WRITE_BACKOFF_MS: u64 = 500;
/// Quiet window before a realtime burst triggers one reload.
const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend REST API.
    pub backend_url: String,
    /// API key sent as a bearer token on every request.
    pub backend_api_key: String,
    /// Directory holding the local persistent key-value store.
    pub data_dir: PathBuf,
    /// Backend fetch deadline in seconds.
    pub fetch_timeout_secs: u64,
    /// Total attempts for backend writes.
    pub write_attempts: u32,
    /// Fixed backoff between write attempts, in milliseconds.
    pub write_backoff_ms: u64,
    /// Realtime reload debounce window, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:54321".to_string(),
            backend_api_key: "test_api_key".to_string(),
            data_dir: std::env::temp_dir(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            write_attempts: DEFAULT_WRITE_ATTEMPTS,
            write_backoff_ms: DEFAULT_WRITE_BACKOFF_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            backend_url: env::var("FAMILY_BACKEND_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("FAMILY_BACKEND_URL"))?,
            backend_api_key: env::var("FAMILY_BACKEND_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FAMILY_BACKEND_API_KEY"))?,
            data_dir: env::var("FAMILY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            fetch_timeout_secs: env_u64("FAMILY_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS),
            write_attempts: env_u64("FAMILY_WRITE_ATTEMPTS", DEFAULT_WRITE_ATTEMPTS as u64) as u32,
            write_backoff_ms: env_u64("FAMILY_WRITE_BACKOFF_MS", DEFAULT_WRITE_BACKOFF_MS),
            debounce_ms: env_u64("FAMILY_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS),
        })
    }

    /// Backend fetch deadline as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Backoff between write attempts as a [`Duration`].
    pub fn write_backoff(&self) -> Duration {
        Duration::from_millis(self.write_backoff_ms)
    }

    /// Realtime reload debounce window as a [`Duration`].
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Parse an optional numeric environment variable, falling back on default.
fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("FAMILY_BACKEND_URL", "https://api.example.test/");
        env::set_var("FAMILY_BACKEND_API_KEY", "k-123");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.backend_url, "https://api.example.test");
        assert_eq!(config.backend_api_key, "k-123");
        assert_eq!(config.fetch_timeout_secs, DEFAULT_FETCH_TIMEOUT_SECS);
        assert_eq!(config.write_attempts, DEFAULT_WRITE_ATTEMPTS);
    }

    #[test]
    fn test_duration_accessors() {
        let config = Config::default();
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(config.debounce_window(), Duration::from_millis(500));
    }
}
