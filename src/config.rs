//! Gateway configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Default session lifetime after last activity.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Flattened JSON lines for log collectors
    Json,
    /// Human-readable output for local development
    Pretty,
}

/// Gateway configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long a session stays valid after its last activity
    pub session_ttl: Duration,
    /// Log output format
    pub log_format: LogFormat,
    /// `EnvFilter` directive string
    pub log_filter: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            log_format: LogFormat::Pretty,
            log_filter: "botgate=debug".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let session_ttl = match env::var("SESSION_TTL_SECS") {
            Ok(raw) => parse_ttl(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        };

        let log_format = match env::var("LOG_FORMAT") {
            Ok(raw) => parse_log_format(&raw)?,
            Err(_) => LogFormat::Json,
        };

        Ok(Self {
            session_ttl,
            log_format,
            log_filter: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_ttl(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid {
            name: "SESSION_TTL_SECS",
            value: raw.to_string(),
        }),
    }
}

fn parse_log_format(raw: &str) -> Result<LogFormat, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "pretty" | "text" => Ok(LogFormat::Pretty),
        _ => Err(ConfigError::Invalid {
            name: "LOG_FORMAT",
            value: raw.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
