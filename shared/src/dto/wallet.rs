use serde::{Deserialize, Serialize};

/// Kind of injected wallet that answered the connection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Connector {
    CoinbaseWallet,
    MetaMask,
    Rabby,
    Brave,
    /// Any other EIP-1193 provider exposed on `window.ethereum`.
    Injected,
}

impl Connector {
    pub fn name(&self) -> &'static str {
        match self {
            Connector::CoinbaseWallet => "Coinbase Wallet",
            Connector::MetaMask => "MetaMask",
            Connector::Rabby => "Rabby",
            Connector::Brave => "Brave Wallet",
            Connector::Injected => "Browser Wallet",
        }
    }

    /// Map the identifier reported by the provider probe.
    pub fn from_id(id: &str) -> Self {
        match id {
            "coinbaseWallet" => Connector::CoinbaseWallet,
            "metaMask" => Connector::MetaMask,
            "rabby" => Connector::Rabby,
            "brave" => Connector::Brave,
            _ => Connector::Injected,
        }
    }
}

/// Payload delivered to connect listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectData {
    /// Active account.
    pub address: String,
    /// Every account the wallet exposed, active account first.
    pub addresses: Vec<String>,
    pub chain_id: u64,
    pub connector: Connector,
    /// True when the session was restored without a user prompt.
    #[serde(default)]
    pub is_reconnected: bool,
}

impl ConnectData {
    pub fn new(address: impl Into<String>, chain_id: u64, connector: Connector) -> Self {
        let address = address.into();
        Self {
            addresses: vec![address.clone()],
            address,
            chain_id,
            connector,
            is_reconnected: false,
        }
    }

    /// Build from an `eth_accounts`-style list. Returns `None` for an empty list.
    pub fn from_accounts(
        accounts: Vec<String>,
        chain_id: u64,
        connector: Connector,
        is_reconnected: bool,
    ) -> Option<Self> {
        let address = accounts.first()?.clone();
        Some(Self {
            address,
            addresses: accounts,
            chain_id,
            connector,
            is_reconnected,
        })
    }
}
