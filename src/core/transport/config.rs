//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// HTTP adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on. `0` lets the operating system choose.
    #[serde(default)]
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path of the calculation endpoint.
    #[serde(default = "default_calc_path")]
    pub calc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_calc_path() -> String {
    "/".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 0,
            host: default_host(),
            calc_path: default_calc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl HttpConfig {
    /// Load HTTP config from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("MATHFORMER_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(0);
        let host = std::env::var("MATHFORMER_HTTP_HOST").unwrap_or_else(|_| default_host());
        let calc_path =
            std::env::var("MATHFORMER_HTTP_PATH").unwrap_or_else(|_| default_calc_path());
        let enable_cors = std::env::var("MATHFORMER_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Self {
            port,
            host,
            calc_path,
            enable_cors,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        format!("HTTP on {}{}", self.address(), self.calc_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::tests::ENV_TEST_LOCK;

    #[test]
    fn test_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.address(), "127.0.0.1:0");
        assert_eq!(config.calc_path, "/");
        assert!(config.enable_cors);
    }

    #[test]
    fn test_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MATHFORMER_HTTP_PORT", "8123");
            std::env::set_var("MATHFORMER_HTTP_HOST", "0.0.0.0");
            std::env::set_var("MATHFORMER_HTTP_PATH", "/calculate");
            std::env::set_var("MATHFORMER_HTTP_CORS", "false");
        }
        let config = HttpConfig::from_env();
        assert_eq!(config.address(), "0.0.0.0:8123");
        assert_eq!(config.calc_path, "/calculate");
        assert!(!config.enable_cors);
        unsafe {
            std::env::remove_var("MATHFORMER_HTTP_PORT");
            std::env::remove_var("MATHFORMER_HTTP_HOST");
            std::env::remove_var("MATHFORMER_HTTP_PATH");
            std::env::remove_var("MATHFORMER_HTTP_CORS");
        }
    }

    #[test]
    fn test_bad_port_falls_back_to_os_assigned() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MATHFORMER_HTTP_PORT", "eighty");
        }
        assert_eq!(HttpConfig::from_env().port, 0);
        unsafe {
            std::env::remove_var("MATHFORMER_HTTP_PORT");
        }
    }
}
