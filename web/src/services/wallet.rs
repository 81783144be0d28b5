//! Injected Ethereum wallet integration via wasm-bindgen
//!
//! Talks to the EIP-1193 provider that browser wallets expose on
//! `window.ethereum` and drives [`WalletContext`] from its responses and
//! events. Coinbase Wallet, MetaMask, Rabby and Brave are recognized by their
//! provider flags; anything else is treated as a generic injected wallet.

use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use shared::dto::wallet::{ConnectData, Connector};
use shared::utils::parse_hex_quantity;
use wasm_bindgen::prelude::*;

use crate::error::{Result, WalletError};
use crate::state::wallet::{WalletContext, WalletState};

// ============================================================================
// PROVIDER INTEROP (JavaScript)
// ============================================================================

#[wasm_bindgen(inline_js = "
export function detectConnector() {
    const eth = window.ethereum;
    if (!eth) {
        return null;
    }
    if (eth.isCoinbaseWallet) {
        return 'coinbaseWallet';
    }
    if (eth.isRabby) {
        return 'rabby';
    }
    if (eth.isBraveWallet) {
        return 'brave';
    }
    if (eth.isMetaMask) {
        return 'metaMask';
    }
    return 'injected';
}

export async function ethRequest(method, params) {
    const eth = window.ethereum;
    if (!eth) {
        throw new Error('NOT_INSTALLED');
    }
    return await eth.request({ method: method, params: params || [] });
}

export function onProviderEvent(name, callback) {
    const eth = window.ethereum;
    if (!eth || typeof eth.on !== 'function') {
        return false;
    }
    eth.on(name, callback);
    return true;
}

export async function copyText(text) {
    await navigator.clipboard.writeText(text);
}
")]
extern "C" {
    fn detectConnector() -> Option<String>;

    #[wasm_bindgen(catch)]
    async fn ethRequest(method: &str, params: JsValue) -> std::result::Result<JsValue, JsValue>;

    fn onProviderEvent(name: &str, callback: &Closure<dyn FnMut(JsValue)>) -> bool;

    #[wasm_bindgen(catch)]
    async fn copyText(text: &str) -> std::result::Result<JsValue, JsValue>;
}

/// Which injected wallet is present, if any.
pub fn detect_connector() -> Option<Connector> {
    detectConnector().map(|id| Connector::from_id(&id))
}

async fn request<T: DeserializeOwned>(method: &str, params: Value) -> Result<T> {
    let params = params.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
    let value = ethRequest(method, params).await?;
    Ok(serde_wasm_bindgen::from_value(value)?)
}

/// `eth_requestAccounts`: prompts the user.
pub async fn request_accounts() -> Result<Vec<String>> {
    request("eth_requestAccounts", json!([])).await
}

/// `eth_accounts`: accounts already authorized for this origin, no prompt.
pub async fn authorized_accounts() -> Result<Vec<String>> {
    request("eth_accounts", json!([])).await
}

pub async fn chain_id() -> Result<u64> {
    let raw: String = request("eth_chainId", json!([])).await?;
    decode_chain_id(&raw)
}

/// `wallet_revokePermissions`. Not every wallet implements it.
pub async fn revoke_permissions() -> Result<()> {
    let _: Value = request("wallet_revokePermissions", json!([{ "eth_accounts": {} }])).await?;
    Ok(())
}

pub async fn copy_to_clipboard(text: &str) -> Result<()> {
    copyText(text).await?;
    Ok(())
}

fn decode_accounts(value: JsValue) -> Result<Vec<String>> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}

fn decode_chain_id(raw: &str) -> Result<u64> {
    parse_hex_quantity(raw)
        .and_then(|id| u64::try_from(id).ok())
        .ok_or_else(|| WalletError::Decode(format!("invalid chain id {}", raw)))
}

// ============================================================================
// DISCONNECT MEMORY
// ============================================================================

/// `localStorage` key set while the user has explicitly disconnected.
pub const DISCONNECTED_KEY: &str = "splitsure.disconnected";
const DISCONNECTED_FLAG: &str = "1";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Whether a silent reconnect may run given the stored disconnect flag.
pub fn should_restore_session(flag: Option<&str>) -> bool {
    flag != Some(DISCONNECTED_FLAG)
}

fn remember_disconnect(disconnected: bool) {
    let Some(storage) = local_storage() else {
        return;
    };
    let result = if disconnected {
        storage.set_item(DISCONNECTED_KEY, DISCONNECTED_FLAG)
    } else {
        storage.remove_item(DISCONNECTED_KEY)
    };
    if let Err(err) = result {
        log::debug!("Could not update {}: {:?}", DISCONNECTED_KEY, err);
    }
}

fn stored_disconnect_flag() -> Option<String> {
    local_storage().and_then(|storage| storage.get_item(DISCONNECTED_KEY).ok().flatten())
}

// ============================================================================
// SESSION FLOWS
// ============================================================================

async fn open_session(connector: Connector, is_reconnected: bool) -> Result<Option<ConnectData>> {
    let accounts = if is_reconnected {
        authorized_accounts().await?
    } else {
        request_accounts().await?
    };
    if accounts.is_empty() {
        return Ok(None);
    }
    let chain_id = chain_id().await?;
    Ok(ConnectData::from_accounts(accounts, chain_id, connector, is_reconnected))
}

/// User-initiated connection.
pub async fn connect(ctx: WalletContext) {
    let Some(connector) = detect_connector() else {
        log::warn!("Connect requested but no injected wallet is available");
        ctx.set_failed(WalletError::NotInstalled);
        return;
    };

    ctx.set_connecting();
    log::info!("Requesting accounts from {}", connector.name());

    match open_session(connector, false).await {
        Ok(Some(data)) => {
            remember_disconnect(false);
            ctx.set_connected(data);
        }
        Ok(None) => ctx.set_failed(WalletError::Decode("wallet returned no accounts".to_string())),
        Err(err) => {
            log::warn!("Wallet connection failed: {}", err);
            ctx.set_failed(err);
        }
    }
}

/// Restore a session the user already authorized, without prompting.
/// Skipped after an explicit disconnect until the next user-initiated connect.
pub async fn reconnect(ctx: WalletContext) {
    if !should_restore_session(stored_disconnect_flag().as_deref()) {
        log::debug!("Session was disconnected by the user; skipping reconnect");
        return;
    }

    let Some(connector) = detect_connector() else {
        log::debug!("No injected wallet; skipping reconnect");
        return;
    };

    ctx.set_reconnecting();

    match open_session(connector, true).await {
        Ok(Some(data)) => {
            log::info!("Restored {} session for {}", connector.name(), data.address);
            ctx.set_connected(data);
        }
        Ok(None) => ctx.cancel_pending(),
        Err(err) => {
            log::debug!("Reconnect failed: {}", err);
            ctx.cancel_pending();
        }
    }
}

pub async fn disconnect(ctx: WalletContext) {
    if let Some(connector) = ctx.connector() {
        log::info!("Disconnecting {}", connector.name());
    }
    remember_disconnect(true);
    if let Err(err) = revoke_permissions().await {
        log::debug!("wallet_revokePermissions unavailable: {}", err);
    }
    ctx.disconnect();
}

// ============================================================================
// PROVIDER EVENTS
// ============================================================================

/// What an `accountsChanged` notification means for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountsChange {
    Disconnect,
    /// Account switch inside an existing session.
    Switch(ConnectData),
    /// Accounts appeared outside a connect flow; chain id must be fetched.
    External(Vec<String>),
    /// A connect flow is in progress and will pick the accounts up itself.
    Ignore,
}

impl AccountsChange {
    pub fn classify(state: &WalletState, accounts: Vec<String>) -> Self {
        if accounts.is_empty() {
            return AccountsChange::Disconnect;
        }
        match state {
            WalletState::Connected { chain_id, connector, .. } => {
                ConnectData::from_accounts(accounts, *chain_id, *connector, false)
                    .map(AccountsChange::Switch)
                    .unwrap_or(AccountsChange::Ignore)
            }
            WalletState::Connecting | WalletState::Reconnecting => AccountsChange::Ignore,
            WalletState::Disconnected => AccountsChange::External(accounts),
        }
    }
}

fn accounts_change(ctx: WalletContext, accounts: Vec<String>) -> AccountsChange {
    ctx.wallet
        .with_untracked(|state| AccountsChange::classify(state, accounts))
}

fn handle_accounts_changed(ctx: WalletContext, accounts: Vec<String>) {
    match accounts_change(ctx, accounts) {
        AccountsChange::Disconnect => ctx.disconnect(),
        AccountsChange::Switch(data) => ctx.set_connected(data),
        AccountsChange::External(accounts) => {
            let connector = detect_connector().unwrap_or(Connector::Injected);
            leptos::task::spawn_local(async move {
                match chain_id().await {
                    Ok(chain_id) => {
                        if let Some(data) =
                            ConnectData::from_accounts(accounts, chain_id, connector, false)
                        {
                            remember_disconnect(false);
                            ctx.set_connected(data);
                        }
                    }
                    Err(err) => log::warn!("Could not read chain id after account change: {}", err),
                }
            });
        }
        AccountsChange::Ignore => {}
    }
}

fn apply_accounts_payload(ctx: WalletContext, payload: Result<Vec<String>>) {
    match payload {
        Ok(accounts) => handle_accounts_changed(ctx, accounts),
        Err(err) => log::warn!("Ignoring malformed accountsChanged payload: {}", err),
    }
}

/// Subscribe `ctx` to the provider's `accountsChanged`, `chainChanged` and
/// `disconnect` events. Call once per page load; the callbacks are never removed.
pub fn install_listeners(ctx: WalletContext) {
    let on_accounts = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        apply_accounts_payload(ctx, decode_accounts(value));
    });

    if !onProviderEvent("accountsChanged", &on_accounts) {
        log::debug!("No injected wallet; provider listeners not installed");
        return;
    }
    on_accounts.forget();

    let on_chain = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        match value.as_string().as_deref().map(decode_chain_id) {
            Some(Ok(chain_id)) => ctx.set_chain(chain_id),
            _ => log::warn!("Ignoring malformed chainChanged payload: {:?}", value),
        }
    });
    onProviderEvent("chainChanged", &on_chain);
    on_chain.forget();

    let on_disconnect = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| ctx.disconnect());
    onProviderEvent("disconnect", &on_disconnect);
    on_disconnect.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_decode_chain_id() {
        assert_eq!(decode_chain_id("0x2105").unwrap(), 8453);
        assert!(decode_chain_id("8453").is_err());
    }

    #[test]
    fn test_empty_accounts_disconnects() {
        let state = WalletState::Disconnected;
        assert_eq!(
            AccountsChange::classify(&state, vec![]),
            AccountsChange::Disconnect
        );
    }

    #[test]
    fn test_switch_keeps_chain_and_connector() {
        let state = WalletState::Connected {
            address: "0x1".to_string(),
            addresses: accounts(&["0x1"]),
            chain_id: 8453,
            connector: Connector::Rabby,
        };
        match AccountsChange::classify(&state, accounts(&["0x2", "0x1"])) {
            AccountsChange::Switch(data) => {
                assert_eq!(data.address, "0x2");
                assert_eq!(data.chain_id, 8453);
                assert_eq!(data.connector, Connector::Rabby);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_pending_connect_ignores_accounts() {
        assert_eq!(
            AccountsChange::classify(&WalletState::Connecting, accounts(&["0x1"])),
            AccountsChange::Ignore
        );
    }

    #[test]
    fn test_accounts_change_reads_wallet_context() {
        let ctx = WalletContext::new();
        assert_eq!(
            accounts_change(ctx, accounts(&["0x1"])),
            AccountsChange::External(accounts(&["0x1"]))
        );

        ctx.set_connected(ConnectData::new("0x1", 8453, Connector::MetaMask));
        match accounts_change(ctx, accounts(&["0x2"])) {
            AccountsChange::Switch(data) => assert_eq!(data.connector, Connector::MetaMask),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(accounts_change(ctx, vec![]), AccountsChange::Disconnect);
    }

    #[test]
    fn test_malformed_accounts_payload_keeps_session() {
        let ctx = WalletContext::new();
        ctx.set_connected(ConnectData::new("0x1", 8453, Connector::MetaMask));

        apply_accounts_payload(ctx, Err(WalletError::Decode("not an array".to_string())));
        assert_eq!(ctx.address().as_deref(), Some("0x1"));

        apply_accounts_payload(ctx, Ok(vec![]));
        assert!(!ctx.is_connected());
    }

    #[test]
    fn test_restore_session_unless_disconnected() {
        assert!(should_restore_session(None));
        assert!(should_restore_session(Some("")));
        assert!(!should_restore_session(Some(DISCONNECTED_FLAG)));
    }

    #[test]
    fn test_external_connect() {
        assert_eq!(
            AccountsChange::classify(&WalletState::Disconnected, accounts(&["0x1"])),
            AccountsChange::External(accounts(&["0x1"]))
        );
    }
}
