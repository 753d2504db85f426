//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const BIND_ENV: &str = "HEARTCHECK_BIND";
pub const MODELS_DIR_ENV: &str = "HEARTCHECK_MODELS_DIR";

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_MODELS_DIR: &str = "models";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid HEARTCHECK_BIND `{value}`: {source}")]
    InvalidBind {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub models_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup(BIND_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidBind {
                value: bind_raw.clone(),
                source,
            })?;

        let models_dir = lookup(MODELS_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                tracing::debug!("{MODELS_DIR_ENV} not set; using `{DEFAULT_MODELS_DIR}`");
                PathBuf::from(DEFAULT_MODELS_DIR)
            });

        Ok(Self { bind, models_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(config.models_dir, PathBuf::from("models"));
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (BIND_ENV, "127.0.0.1:5000"),
            (MODELS_DIR_ENV, "/srv/heartcheck/models"),
        ]))
        .unwrap();
        assert_eq!(config.bind.port(), 5000);
        assert_eq!(config.models_dir, PathBuf::from("/srv/heartcheck/models"));
    }

    #[test]
    fn rejects_bad_bind_address() {
        let err = ServerConfig::from_lookup(lookup(&[(BIND_ENV, "localhost")])).unwrap_err();
        assert!(err.to_string().contains("localhost"));
    }
}
