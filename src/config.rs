//! Console configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

/// Top-level console configuration.
///
/// Loaded once at startup via [`ConsoleConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Base URL of the hospital REST API, without trailing slash.
    pub hospital_api_url: String,

    /// Total timeout in seconds for a single hospital API request.
    pub request_timeout_secs: u64,

    /// Timeout in seconds for establishing a connection.
    pub connect_timeout_secs: u64,

    /// Page size used when loading form dropdown lookups.
    pub lookup_limit: u32,

    /// Whether to allow any origin (the UI is usually served elsewhere).
    pub cors_permissive: bool,

    /// Log output format: `json` or plain text (anything else).
    pub log_format: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            hospital_api_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            lookup_limit: 100,
            cors_permissive: true,
            log_format: "text".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to the [`Default`] values when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.listen_addr,
        };

        let hospital_api_url = std::env::var("HOSPITAL_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.hospital_api_url);

        Ok(Self {
            listen_addr,
            hospital_api_url,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs),
            connect_timeout_secs: parse_env("CONNECT_TIMEOUT_SECS", defaults.connect_timeout_secs),
            lookup_limit: parse_env("LOOKUP_LIMIT", defaults.lookup_limit),
            cors_permissive: parse_env_bool("CORS_PERMISSIVE", defaults.cors_permissive),
            log_format: std::env::var("LOG_FORMAT").unwrap_or(defaults.log_format),
        })
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether logs should be emitted as JSON lines.
    #[must_use]
    pub fn log_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}
