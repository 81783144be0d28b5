//! # Formatting Utilities
//!
//! Balance formatting for the identity widgets.
//! For address formatting, use [`shared::utils::truncate_address`].

use super::constants::{BALANCE_DECIMALS, BALANCE_PLACEHOLDER, WEI_PER_ETH};

/// Insert commas between groups of three digits (e.g., "1234567" -> "1,234,567")
pub fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Format wei as ETH, truncating (not rounding) to `decimals` places.
///
/// # Examples
///
/// ```rust
/// use splitsure_web::utils::format::format_wei_to_eth;
///
/// assert_eq!(format_wei_to_eth(1_500_000_000_000_000_000, 4), "1.5000");
/// assert_eq!(format_wei_to_eth(0, 2), "0.00");
/// ```
pub fn format_wei_to_eth(wei: u128, decimals: usize) -> String {
    let whole = group_thousands(&(wei / WEI_PER_ETH).to_string());
    if decimals == 0 {
        return whole;
    }

    let fraction = format!("{:018}", wei % WEI_PER_ETH);
    format!("{}.{}", whole, &fraction[..decimals.min(18)])
}

/// Balance label for display, or a placeholder while unknown.
pub fn format_balance(wei: Option<u128>) -> String {
    match wei {
        Some(wei) => format!("{} ETH", format_wei_to_eth(wei, BALANCE_DECIMALS)),
        None => BALANCE_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("100"), "100");
        assert_eq!(group_thousands("0"), "0");
    }

    #[test]
    fn test_format_wei_to_eth() {
        assert_eq!(format_wei_to_eth(WEI_PER_ETH, 4), "1.0000");
        assert_eq!(format_wei_to_eth(123_456_789_000_000_000, 4), "0.1234");
        assert_eq!(format_wei_to_eth(1_234 * WEI_PER_ETH, 0), "1,234");
        assert_eq!(format_wei_to_eth(1, 18), "0.000000000000000001");
        assert_eq!(format_wei_to_eth(1, 30), "0.000000000000000001");
    }

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance(None), "--");
        assert_eq!(format_balance(Some(2 * WEI_PER_ETH)), "2.0000 ETH");
    }
}
