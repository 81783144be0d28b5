//! # Wallet Errors
//!
//! Failures surfaced by the injected-provider bridge and the balance lookup.
//! The connection tracker itself never fails; these errors only reach the
//! widget layer, which shows them next to the connect button.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Convenience alias used by the service layer.
pub type Result<T> = std::result::Result<T, WalletError>;

/// EIP-1193 code for "user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No `window.ethereum` provider was found.
    #[error("No browser wallet found. Install Coinbase Wallet or another Ethereum wallet extension.")]
    NotInstalled,

    /// The user dismissed the wallet prompt.
    #[error("Connection request was rejected")]
    Rejected,

    /// Provider returned an error object.
    #[error("Wallet error ({code}): {message}")]
    Provider { code: i64, message: String },

    /// JSON-RPC node call failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// A value from JavaScript or the node had an unexpected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl WalletError {
    /// Classify an EIP-1193 error by code and message.
    pub fn from_provider(code: Option<i64>, message: impl Into<String>) -> Self {
        match code {
            Some(USER_REJECTED_CODE) => WalletError::Rejected,
            Some(code) => WalletError::Provider {
                code,
                message: message.into(),
            },
            None => WalletError::Provider {
                code: -1,
                message: message.into(),
            },
        }
    }
}

impl From<JsValue> for WalletError {
    fn from(value: JsValue) -> Self {
        let code = js_sys::Reflect::get(&value, &JsValue::from_str("code"))
            .ok()
            .and_then(|c| c.as_f64())
            .map(|c| c as i64);
        let message = js_sys::Reflect::get(&value, &JsValue::from_str("message"))
            .ok()
            .and_then(|m| m.as_string())
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{:?}", value));
        if message == "NOT_INSTALLED" {
            return WalletError::NotInstalled;
        }
        WalletError::from_provider(code, message)
    }
}

impl From<serde_wasm_bindgen::Error> for WalletError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        WalletError::Decode(err.to_string())
    }
}

impl From<gloo_net::Error> for WalletError {
    fn from(err: gloo_net::Error) -> Self {
        WalletError::Rpc(err.to_string())
    }
}
