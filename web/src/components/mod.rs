//! UI Components

pub mod identity;
pub mod layout;
pub mod wallet;

pub use identity::{Address, Avatar, Badge, EthBalance, Identity, Name};
pub use layout::{Providers, RootLayout};
pub use wallet::{
    ConnectWallet, Wallet, WalletDropdown, WalletDropdownBasename, WalletDropdownDisconnect,
    WalletDropdownLink,
};
