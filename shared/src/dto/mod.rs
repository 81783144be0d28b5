//! # Data Transfer Objects
//!
//! - [`wallet`] - Connection lifecycle payloads
//! - [`rpc`] - JSON-RPC 2.0 envelopes for node calls
//!
//! ## Example JSON
//!
//! ```text
//! {
//!   "address": "0x71C7656EC7ab88b098defB751B7401B5f6d8976F",
//!   "addresses": ["0x71C7656EC7ab88b098defB751B7401B5f6d8976F"],
//!   "chainId": 8453,
//!   "connector": "coinbaseWallet",
//!   "isReconnected": false
//! }
//! ```

pub mod rpc;
pub mod wallet;

pub use rpc::*;
pub use wallet::*;
