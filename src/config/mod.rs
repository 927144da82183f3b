//! Layered configuration loading using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`TASKBOARD_` prefix, `__` between sections)
//! 2. `taskboard.toml` in the working directory
//! 3. Built-in defaults
//!
//! `TASKBOARD_API__BASE_URL` maps to `api.base_url`,
//! `TASKBOARD_LOG__FILTER` to `log.filter`.

mod error;

pub use error::ConfigError;

use crate::session::Session;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "taskboard.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TASKBOARD_";

fn default_base_url() -> String {
    "http://localhost:8080/api".to_owned()
}

fn default_filter() -> String {
    "info".to_owned()
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL the REST paths are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout; no timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Bearer token of the signed-in user.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            token: None,
        }
    }
}

impl ApiConfig {
    /// Builds the session described by the configured token.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::from_token(self.token.as_deref())
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogConfig {
    /// `tracing` env-filter directive; `RUST_LOG` overrides it.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl BoardConfig {
    /// Loads configuration from `taskboard.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is
    /// invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads configuration after reading a `.env` file, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is
    /// invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            debug!(error = %err, "no .env file loaded");
        }
        Self::load()
    }

    /// Loads configuration using `path` as the TOML layer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is
    /// invalid.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the provider chain with `path` as the TOML layer.
    ///
    /// A missing file contributes nothing.
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-HTTP base URL or a
    /// zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_owned(),
                reason: format!("expected an http(s) URL, got '{base_url}'"),
            });
        }
        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_owned(),
                reason: "timeout must be at least one second".to_owned(),
            });
        }
        Ok(())
    }
}
