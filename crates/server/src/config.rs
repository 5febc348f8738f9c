use cinedeck_metadata::tmdb::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE, TmdbConfig};
use thiserror::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Process configuration, read from `CINEDECK_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub tmdb: TmdbConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key =
            var("CINEDECK_TMDB_API_KEY").ok_or(ConfigError::Missing("CINEDECK_TMDB_API_KEY"))?;

        let timeout_secs = match var("CINEDECK_HTTP_TIMEOUT_SECS") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "CINEDECK_HTTP_TIMEOUT_SECS",
                value: v,
            })?,
            None => TmdbConfig::default().timeout_secs,
        };

        Ok(Self {
            bind: var("CINEDECK_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            tmdb: TmdbConfig {
                api_key,
                base_url: var("CINEDECK_TMDB_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                image_base_url: var("CINEDECK_TMDB_IMAGE_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_IMAGE_BASE.to_string()),
                timeout_secs,
            },
        })
    }
}
