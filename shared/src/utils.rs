//! # Shared Utility Functions
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Keep the first N and last M characters with an ellipsis
//! - [`truncate_address`] - `0x1234...abcd` form used across the UI
//!
//! ## JSON-RPC Quantities
//!
//! - [`parse_hex_quantity`] - Decode `0x`-prefixed hex quantities (balances, chain ids)
//!
//! ```rust
//! use shared::utils::{parse_hex_quantity, truncate_address};
//!
//! assert_eq!(truncate_address("0x71C7656EC7ab88b098defB751B7401B5f6d8976F"), "0x71C7...976F");
//! assert_eq!(parse_hex_quantity("0x2105"), Some(8453));
//! ```

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
/// assert_eq!(format_address(addr, 6, 4), "0x71C7...976F");
/// assert_eq!(format_address(addr, 4, 4), "0x71...976F");
/// assert_eq!(format_address("0xABC", 6, 4), "0xABC");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len {
        return address.to_string();
    }

    let suffix_start = address_len - suffix_len;
    if !address.is_char_boundary(prefix_len) || !address.is_char_boundary(suffix_start) {
        return address.to_string();
    }

    format!("{}...{}", &address[..prefix_len], &address[suffix_start..])
}

/// Format an address as `0x` plus four characters, an ellipsis, and the last four characters.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Check for a `0x`-prefixed 20-byte hex address. Checksum casing is not verified.
pub fn is_valid_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Decode a JSON-RPC quantity such as `"0x1bc16d674ec80000"`.
///
/// Returns `None` for a missing prefix, empty digits, non-hex characters, or overflow.
pub fn parse_hex_quantity(value: &str) -> Option<u128> {
    let digits = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))?;
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}
