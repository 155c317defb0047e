//! Application configuration loaded from environment variables.

use axum::http::HeaderValue;
use serde::Deserialize;
use strum::{Display, EnumString};

/// Deployment environment the service reports to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Project Metadata ===
    /// Project title shown in the OpenAPI document.
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Short project description.
    #[serde(default = "default_project_description")]
    pub project_description: String,

    /// Version reported by `/`, `/health` and the OpenAPI document.
    #[serde(default = "default_app_version")]
    pub app_version: String,

    /// Deployment environment.
    #[serde(default = "default_environment")]
    pub environment: Environment,

    // === Routing ===
    /// Prefix for versioned API routes.
    #[serde(default = "default_api_v1_prefix")]
    pub api_v1_prefix: String,

    /// Allowed CORS origins, comma separated. `*` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub backend_cors_origins: Vec<String>,

    // === Rate Limiting ===
    /// Enable the per-client rate limiter.
    #[serde(default)]
    pub rate_limit_enabled: bool,

    /// Requests allowed per client in one window.
    #[serde(default = "default_rate_limit_requests")]
    pub rate_limit_requests: u32,

    /// Window length in seconds.
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_seconds: u64,

    // === Server Configuration ===
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_project_name() -> String {
    "Scaffold API".to_string()
}

fn default_project_description() -> String {
    "A sample web project with a structured layout.".to_string()
}

fn default_app_version() -> String {
    "1.0.0".to_string()
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_api_v1_prefix() -> String {
    "/api/v1".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:8000".to_string(),
    ]
}

fn default_rate_limit_requests() -> u32 {
    100
}

fn default_rate_limit_window() -> u64 {
    60
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            project_description: default_project_description(),
            app_version: default_app_version(),
            environment: default_environment(),
            api_v1_prefix: default_api_v1_prefix(),
            backend_cors_origins: default_cors_origins(),
            rate_limit_enabled: false,
            rate_limit_requests: default_rate_limit_requests(),
            rate_limit_window_seconds: default_rate_limit_window(),
            host: default_host(),
            port: default_port(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.api_v1_prefix.starts_with('/') {
            return Err("API_V1_PREFIX must start with /".to_string());
        }

        if self.api_v1_prefix.len() < 2 || self.api_v1_prefix.ends_with('/') {
            return Err("API_V1_PREFIX must name a path segment without a trailing /".to_string());
        }

        for origin in &self.backend_cors_origins {
            if origin != "*" && HeaderValue::from_str(origin).is_err() {
                return Err(format!("BACKEND_CORS_ORIGINS contains invalid origin {origin:?}"));
            }
        }

        if self.rate_limit_enabled {
            if self.rate_limit_requests == 0 {
                return Err("RATE_LIMIT_REQUESTS must be at least 1".to_string());
            }
            if self.rate_limit_window_seconds == 0 {
                return Err("RATE_LIMIT_WINDOW_SECONDS must be at least 1".to_string());
            }
        }

        Ok(())
    }

    /// Whether any origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.backend_cors_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.api_v1_prefix, "/api/v1");
        assert_eq!(config.app_version, "1.0.0");
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.rate_limit_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_parses_lowercase() {
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!(Environment::Staging.to_string(), "staging");
    }

    #[test]
    fn validate_rejects_prefix_without_leading_slash() {
        let config = Config {
            api_v1_prefix: "api/v1".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_trailing_slash_prefix() {
        let config = Config {
            api_v1_prefix: "/api/v1/".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_rate_limit_when_enabled() {
        let config = Config {
            rate_limit_enabled: true,
            rate_limit_requests: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn wildcard_origin_is_detected() {
        let config = Config {
            backend_cors_origins: vec!["*".to_string()],
            ..Config::default()
        };

        assert!(config.allows_any_origin());
        assert!(config.validate().is_ok());
    }
}
