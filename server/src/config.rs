//! # Server Configuration
//!
//! Loaded from environment variables (after `.env` via `dotenvy`):
//!
//! | Variable | Default |
//! |----------|---------|
//! | `SPLITSURE_BIND_ADDRESS` | `127.0.0.1:8080` |
//! | `SPLITSURE_DIST_DIR` | `dist` |
//! | `SPLITSURE_ALLOWED_ORIGINS` | empty (any origin) |
//!
//! `SPLITSURE_ALLOWED_ORIGINS` is a comma-separated list.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_DIST_DIR: &str = "dist";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SPLITSURE_BIND_ADDRESS must be host:port, got {0}")]
    InvalidBindAddress(String),

    #[error("SPLITSURE_DIST_DIR must not be empty")]
    EmptyDistDir,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080")
    pub bind_address: String,
    /// Directory holding `index.html` and the WASM bundle
    pub dist_dir: PathBuf,
    /// Allowed CORS origins; empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
            allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_address = lookup("SPLITSURE_BIND_ADDRESS")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.bind_address);

        let dist_dir = lookup("SPLITSURE_DIST_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.dist_dir);

        let allowed_origins = lookup("SPLITSURE_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let config = Self {
            bind_address,
            dist_dir,
            allowed_origins,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::InvalidBindAddress(self.bind_address.clone()));
        }

        if self.dist_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDistDir);
        }

        Ok(())
    }

    pub fn index_file(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}
