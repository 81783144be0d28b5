//! Application constants

pub const HEADLINE: &str = "Simplifying shared expenses with Transparency, Trust and Crypto";

/// Class binding the `--font-sans` variable to the Chestor face in `style.css`.
pub const FONT_VARIABLE_CLASS: &str = "font-chestor";

pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;
pub const BALANCE_DECIMALS: usize = 4;
pub const BALANCE_PLACEHOLDER: &str = "--";

pub const COPY_FEEDBACK_MS: u32 = 1500;

/// Element shown by `index.html` until the WASM bundle mounts.
pub const LOADING_ELEMENT_ID: &str = "leptos-loading";
