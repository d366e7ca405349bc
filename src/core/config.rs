//! Configuration management for the calculator.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and a `.env` file, if present) on top of defaults.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::transport::HttpConfig;

/// Selects native arithmetic when set to one of [`NATIVE_BACKEND_SETTINGS`].
pub const BACKEND_ENV: &str = "MATHFORMER_BACKEND";

/// Base URL of the external mathformer service.
pub const BACKEND_URL_ENV: &str = "MATHFORMER_URL";

/// Startup probe timeout in milliseconds.
pub const PROBE_TIMEOUT_ENV: &str = "MATHFORMER_PROBE_TIMEOUT_MS";

/// Log level filter.
pub const LOG_LEVEL_ENV: &str = "MATHFORMER_LOG_LEVEL";

/// Backend settings that opt out of the external backend.
pub const NATIVE_BACKEND_SETTINGS: [&str; 4] = ["lite", "builtin", "pure", "none"];

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Arithmetic backend configuration.
    pub backend: BackendConfig,

    /// HTTP adapter configuration.
    pub http: HttpConfig,

    /// Environment settings that were present but unusable.
    #[serde(skip)]
    ignored: Vec<String>,
}

/// Service identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name reported by the HTTP adapter.
    pub name: String,

    /// The version of the service.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// How the arithmetic backend should be chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    /// Always use native arithmetic.
    ForcedNative,

    /// Use the external backend if it can be loaded, native arithmetic otherwise.
    #[default]
    Auto,
}

impl BackendMode {
    /// Interpret the value of [`BACKEND_ENV`].
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace. Any
    /// unrecognized value means "try the external backend".
    pub fn from_setting(value: &str) -> Self {
        let value = value.trim().to_lowercase();
        if NATIVE_BACKEND_SETTINGS.contains(&value.as_str()) {
            Self::ForcedNative
        } else {
            Self::Auto
        }
    }
}

/// Arithmetic backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Selection mode.
    pub mode: BackendMode,

    /// Base URL of the external mathformer service.
    pub url: String,

    /// How long the startup probe may take before the backend counts as absent.
    pub probe_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Auto,
            url: "http://127.0.0.1:8765".to_string(),
            probe_timeout_ms: 500,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mathformer-calc".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            backend: BackendConfig::default(),
            http: HttpConfig::default(),
            ignored: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `MATHFORMER_`.
    /// For example: `MATHFORMER_BACKEND`, `MATHFORMER_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            config.logging.level = level;
        }

        if let Ok(mode) = std::env::var(BACKEND_ENV) {
            config.backend.mode = BackendMode::from_setting(&mode);
        }

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            config.backend.url = url;
        }

        if let Ok(timeout) = std::env::var(PROBE_TIMEOUT_ENV) {
            match timeout.trim().parse() {
                Ok(ms) => config.backend.probe_timeout_ms = ms,
                Err(_) => config.ignored.push(format!(
                    "Ignoring {}={:?}: not a number of milliseconds",
                    PROBE_TIMEOUT_ENV, timeout
                )),
            }
        }

        config.http = HttpConfig::from_env();

        config
    }

    /// Settings read by [`Config::from_env`] that were ignored, with the reason.
    pub fn ignored_settings(&self) -> &[String] {
        &self.ignored
    }

    /// Log what [`Config::from_env`] decided.
    ///
    /// Loading happens before the subscriber exists, so call this once
    /// logging is initialized.
    pub fn log_summary(&self) {
        for message in &self.ignored {
            warn!("{}", message);
        }
        if self.backend.mode == BackendMode::ForcedNative {
            info!("{} selects native arithmetic", BACKEND_ENV);
        }
    }
}
