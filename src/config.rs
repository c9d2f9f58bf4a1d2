//! Console configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), each with a default that matches the
//! console's documented behavior.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConsoleError;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConsoleError::InvalidConfig(format!(
                "LOG_FORMAT must be `pretty` or `json`, got `{other}`"
            ))),
        }
    }
}

/// Top-level console configuration.
///
/// Loaded once at startup via [`ConsoleConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Directory mounted at `/static`.
    pub static_dir: PathBuf,

    /// Tracing output format.
    pub log_format: LogFormat,

    /// Timeout applied to plain HTTP requests. Upgraded sockets are not
    /// affected.
    pub http_request_timeout: Duration,

    /// Whether to attach a permissive CORS layer.
    pub cors_permissive: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            static_dir: PathBuf::from("static"),
            log_format: LogFormat::Pretty,
            http_request_timeout: Duration::from_secs(30),
            cors_permissive: true,
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to [`ConsoleConfig::default`] for every unset variable.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidConfig`] if `LISTEN_ADDR` is set but is
    /// not a [`SocketAddr`], or `LOG_FORMAT` is set to an unknown format.
    pub fn from_env() -> Result<Self, ConsoleError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ConsoleConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConsoleError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let listen_addr: SocketAddr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw.parse().map_err(|e| {
                ConsoleError::InvalidConfig(format!("LISTEN_ADDR `{raw}`: {e}"))
            })?,
            None => defaults.listen_addr,
        };

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let log_format: LogFormat = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        let http_request_timeout = Duration::from_secs(parse_value(
            lookup("HTTP_REQUEST_TIMEOUT_SECS"),
            defaults.http_request_timeout.as_secs(),
        ));

        let cors_permissive = parse_bool(lookup("CORS_PERMISSIVE"), defaults.cors_permissive);

        Ok(Self {
            listen_addr,
            static_dir,
            log_format,
            http_request_timeout,
            cors_permissive,
        })
    }
}

/// Parses a raw value as `T`, returning `default` on missing or invalid
/// values.
fn parse_value<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Parses a raw value as a boolean. Accepts `"true"`, `"1"`, `"false"`,
/// `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_bool(raw: Option<String>, default: bool) -> bool {
    match raw.map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}
