//! # Shared Wallet Types
//!
//! Types and helpers used by both the browser app and the static host.
//!
//! ## Structure
//!
//! - **[`dto`]**: Serializable data
//!   - **[`dto::wallet`]**: Account connection data and connector kinds
//!   - **[`dto::rpc`]**: Ethereum JSON-RPC request/response envelopes
//! - **[`utils`]**: Address and quantity helpers
//!   - **[`utils::format_address`]**: Shorten an address for display
//!   - **[`utils::parse_hex_quantity`]**: Decode a `0x`-prefixed JSON-RPC quantity
//!
//! ## Wire Format
//!
//! Wallet data crosses the JavaScript boundary, so structs serialize with
//! **camelCase** field names to match what EIP-1193 providers and web tooling
//! expect. JSON-RPC envelopes follow the JSON-RPC 2.0 field names verbatim.
//!
//! ```rust
//! use shared::dto::wallet::{ConnectData, Connector};
//! use shared::utils::truncate_address;
//!
//! let data = ConnectData::new("0x71C7656EC7ab88b098defB751B7401B5f6d8976F", 8453, Connector::Injected);
//! assert_eq!(truncate_address(&data.address), "0x71C7...976F");
//! ```

pub mod dto;
pub mod utils;

pub use dto::*;
pub use utils::*;
