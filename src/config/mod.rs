//! Environment configuration.
//!
//! # Responsibilities
//! - Read the connection URI and listen port from the environment
//! - Fail fast with a descriptive error before any connection attempt
//!
//! # Design Decisions
//! - `from_env` delegates to a lookup-function variant so tests never
//!   mutate process environment
//! - An empty `MONGODB_URI` is treated the same as a missing one

use thiserror::Error;

/// Environment variable holding the MongoDB connection URI.
pub const ENV_MONGODB_URI: &str = "MONGODB_URI";

/// Environment variable holding the listen port for the standalone server.
pub const ENV_PORT: &str = "PORT";

const DEFAULT_PORT: u16 = 3000;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value {value:?} for environment variable {var}")]
    InvalidVar { var: &'static str, value: String },
}

/// Runtime configuration for the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// MongoDB connection URI. Never logged verbatim; see
    /// [`crate::db::mask_credentials`].
    pub mongodb_uri: String,

    /// Bind address for the standalone server (e.g. "0.0.0.0:3000").
    pub bind_address: String,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mongodb_uri = lookup(ENV_MONGODB_URI)
            .filter(|uri| !uri.is_empty())
            .ok_or(ConfigError::MissingVar(ENV_MONGODB_URI))?;

        let port = match lookup(ENV_PORT) {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: ENV_PORT,
                value: raw,
            })?,
        };

        Ok(Self {
            mongodb_uri,
            bind_address: format!("0.0.0.0:{port}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn loads_uri_and_default_port() {
        let config =
            AppConfig::from_lookup(vars(&[(ENV_MONGODB_URI, "mongodb://localhost:27017/db")]))
                .unwrap();
        assert_eq!(config.mongodb_uri, "mongodb://localhost:27017/db");
        assert_eq!(config.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn respects_explicit_port() {
        let config = AppConfig::from_lookup(vars(&[
            (ENV_MONGODB_URI, "mongodb://localhost:27017"),
            (ENV_PORT, "8081"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8081");
    }

    #[test]
    fn missing_uri_is_an_error() {
        let err = AppConfig::from_lookup(vars(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_MONGODB_URI)));
    }

    #[test]
    fn empty_uri_is_an_error() {
        let err = AppConfig::from_lookup(vars(&[(ENV_MONGODB_URI, "")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ENV_MONGODB_URI)));
    }

    #[test]
    fn non_numeric_port_is_an_error() {
        let err = AppConfig::from_lookup(vars(&[
            (ENV_MONGODB_URI, "mongodb://localhost:27017"),
            (ENV_PORT, "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: ENV_PORT, .. }));
    }
}
