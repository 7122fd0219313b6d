//! Configuration module

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Classifier artifact (.json forest or .onnx)
    pub model_path: PathBuf,

    /// Start without a model instead of exiting
    pub allow_missing_model: bool,

    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 5001,
            model_path: PathBuf::from("models/phishing_forest.json"),
            allow_missing_model: false,
            log_format: LogFormat::Pretty,
            environment: "development".to_string(),
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(v) => parse("HOST", v)?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(v) => parse("PORT", v)?,
            None => defaults.port,
        };

        let model_path = lookup("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        let allow_missing_model = match lookup("PHISHGUARD_ALLOW_MISSING_MODEL") {
            Some(v) => parse_bool("PHISHGUARD_ALLOW_MISSING_MODEL", v)?,
            None => defaults.allow_missing_model,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" | "text" | "" => LogFormat::Pretty,
                _ => return Err(ConfigError::InvalidValue { key: "LOG_FORMAT", value: v }),
            },
            None => defaults.log_format,
        };

        let environment = lookup("ENVIRONMENT").unwrap_or(defaults.environment);

        Ok(Self {
            host,
            port,
            model_path,
            allow_missing_model,
            log_format,
            environment,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
