//! # Application Configuration
//!
//! Static settings for the landing page. Defaults target Base mainnet; each
//! field that varies between deployments can be overridden at build time:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SPLITSURE_RPC_URL` | [`AppConfig::rpc_url`] |
//! | `SPLITSURE_CHAIN_ID` | [`AppConfig::chain_id`] |
//! | `SPLITSURE_SCHEMA_ID` | [`AppConfig::schema_id`] |
//!
//! ```bash
//! SPLITSURE_RPC_URL=https://sepolia.base.org SPLITSURE_CHAIN_ID=84532 trunk build --release
//! ```
//!
//! Call [`init_config()`] once at startup, then read it anywhere with [`app_config()`].

use std::sync::OnceLock;
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "Splitsure";
pub const DEFAULT_DESCRIPTION: &str = "Splitsure";
pub const DEFAULT_RPC_URL: &str = "https://mainnet.base.org";
pub const DEFAULT_CHAIN_ID: u64 = 8453;
pub const DEFAULT_SCHEMA_ID: &str = "0x1";
pub const DEFAULT_WALLET_URL: &str = "https://keys.coinbase.com";
pub const DEFAULT_BASENAME_URL: &str = "https://www.base.org/names";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Config has already been initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Document title
    pub title: String,
    /// `<meta name="description">` content
    pub description: String,
    /// JSON-RPC endpoint used for balance lookups
    pub rpc_url: String,
    /// Chain served by `rpc_url`; balances are only shown for wallets on it
    pub chain_id: u64,
    /// Attestation schema shown by the identity badge
    pub schema_id: String,
    /// Target of the "Wallet" dropdown link
    pub wallet_url: String,
    /// Target of the name-registration dropdown link
    pub basename_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            schema_id: DEFAULT_SCHEMA_ID.to_string(),
            wallet_url: DEFAULT_WALLET_URL.to_string(),
            basename_url: DEFAULT_BASENAME_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from variables captured at compile time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::with_overrides(
            option_env!("SPLITSURE_RPC_URL"),
            option_env!("SPLITSURE_CHAIN_ID"),
            option_env!("SPLITSURE_SCHEMA_ID"),
        )
    }

    /// Apply optional overrides on top of the defaults.
    pub fn with_overrides(
        rpc_url: Option<&str>,
        chain_id: Option<&str>,
        schema_id: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = rpc_url.map(str::trim).filter(|s| !s.is_empty()) {
            config.rpc_url = url.to_string();
        }

        if let Some(raw) = chain_id.map(str::trim).filter(|s| !s.is_empty()) {
            config.chain_id = raw.parse().map_err(|_| ConfigError::InvalidNumber {
                name: "SPLITSURE_CHAIN_ID",
                value: raw.to_string(),
            })?;
        }

        if let Some(schema) = schema_id.map(str::trim) {
            config.schema_id = schema.to_string();
        }

        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Invalid("title must not be empty".to_string()));
        }

        if !(self.rpc_url.starts_with("https://") || self.rpc_url.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "rpc_url must be an http(s) URL, got {}",
                self.rpc_url
            )));
        }

        if self.chain_id == 0 {
            return Err(ConfigError::Invalid("chain_id must be non-zero".to_string()));
        }

        // Empty schema id disables the badge.
        if !self.schema_id.is_empty() && !self.schema_id.starts_with("0x") {
            return Err(ConfigError::Invalid(format!(
                "schema_id must be 0x-prefixed, got {}",
                self.schema_id
            )));
        }

        Ok(())
    }
}

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration from the build environment.
pub fn init_config() -> Result<(), ConfigError> {
    let config = AppConfig::from_build_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// Global configuration; falls back to defaults if [`init_config()`] was never called.
pub fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chain_id, 8453);
        assert_eq!(config.schema_id, "0x1");
    }

    #[test]
    fn test_overrides() {
        let config =
            AppConfig::with_overrides(Some("https://sepolia.base.org"), Some(" 84532 "), None)
                .unwrap();
        assert_eq!(config.rpc_url, "https://sepolia.base.org");
        assert_eq!(config.chain_id, 84532);
        assert_eq!(config.schema_id, DEFAULT_SCHEMA_ID);
    }

    #[test]
    fn test_blank_overrides_keep_defaults() {
        let config = AppConfig::with_overrides(Some(""), Some("  "), None).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_chain_id() {
        let err = AppConfig::with_overrides(None, Some("base"), None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: "SPLITSURE_CHAIN_ID",
                value: "base".to_string()
            }
        );
    }

    #[test]
    fn test_empty_schema_disables_badge() {
        let config = AppConfig::with_overrides(None, None, Some("")).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.schema_id.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.rpc_url = "ws://node".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.chain_id = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.schema_id = "1".to_string();
        assert!(config.validate().is_err());
    }
}
