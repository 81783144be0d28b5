//! Wallet state management
//!
//! [`WalletState`] holds the connection lifecycle and decides which lifecycle
//! event, if any, a transition produces. [`WalletContext`] stores it in a
//! signal and forwards those events to the [`AccountEvents`] bus.

use leptos::prelude::*;
use shared::dto::wallet::{ConnectData, Connector};

use crate::error::WalletError;
use crate::services::events::{AccountEvents, AccountHandlers, Subscription};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WalletState {
    #[default]
    Disconnected,
    /// User-initiated connection awaiting wallet approval.
    Connecting,
    /// Silent session restore on page load.
    Reconnecting,
    Connected {
        address: String,
        addresses: Vec<String>,
        chain_id: u64,
        connector: Connector,
    },
}

/// Notification produced by a state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Connect(ConnectData),
    Disconnect,
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletState::Connected { .. })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, WalletState::Connecting | WalletState::Reconnecting)
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            WalletState::Connected { address, .. } => Some(address),
            _ => None,
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        match self {
            WalletState::Connected { chain_id, .. } => Some(*chain_id),
            _ => None,
        }
    }

    pub fn connector(&self) -> Option<Connector> {
        match self {
            WalletState::Connected { connector, .. } => Some(*connector),
            _ => None,
        }
    }

    pub fn connecting(&mut self) {
        if matches!(self, WalletState::Disconnected) {
            *self = WalletState::Connecting;
        }
    }

    pub fn reconnecting(&mut self) {
        if matches!(self, WalletState::Disconnected) {
            *self = WalletState::Reconnecting;
        }
    }

    /// Enter `Connected`. Only the first entry announces a connect; an account
    /// switch while already connected updates the state silently.
    pub fn connected(&mut self, data: ConnectData) -> Option<LifecycleEvent> {
        let was_connected = self.is_connected();
        *self = WalletState::Connected {
            address: data.address.clone(),
            addresses: data.addresses.clone(),
            chain_id: data.chain_id,
            connector: data.connector,
        };
        (!was_connected).then_some(LifecycleEvent::Connect(data))
    }

    /// Leave any state for `Disconnected`. Announces only when leaving `Connected`.
    pub fn disconnected(&mut self) -> Option<LifecycleEvent> {
        let was_connected = self.is_connected();
        *self = WalletState::Disconnected;
        was_connected.then_some(LifecycleEvent::Disconnect)
    }

    pub fn chain_changed(&mut self, new_chain_id: u64) {
        if let WalletState::Connected { chain_id, .. } = self {
            *chain_id = new_chain_id;
        }
    }

    /// Abandon a pending connection attempt.
    pub fn failed(&mut self) {
        if self.is_pending() {
            *self = WalletState::Disconnected;
        }
    }
}

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub wallet: RwSignal<WalletState>,
    pub error: RwSignal<Option<WalletError>>,
    events: StoredValue<AccountEvents>,
}

impl WalletContext {
    pub fn new() -> Self {
        Self {
            wallet: RwSignal::new(WalletState::Disconnected),
            error: RwSignal::new(None),
            events: StoredValue::new(AccountEvents::new()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.wallet.with(|state| state.is_connected())
    }

    pub fn is_pending(&self) -> bool {
        self.wallet.with(|state| state.is_pending())
    }

    /// Current account, if any.
    pub fn address(&self) -> Option<String> {
        self.wallet.with(|state| state.address().map(str::to_string))
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.wallet.with(|state| state.chain_id())
    }

    pub fn connector(&self) -> Option<Connector> {
        self.wallet.with(|state| state.connector())
    }

    pub fn error(&self) -> Option<WalletError> {
        self.error.get()
    }

    pub fn events(&self) -> AccountEvents {
        self.events.get_value()
    }

    /// Register lifecycle callbacks on this context's bus.
    pub fn subscribe(&self, handlers: AccountHandlers) -> Subscription {
        self.events.with_value(|events| events.subscribe(handlers))
    }

    pub fn set_connecting(&self) {
        self.error.set(None);
        self.wallet.update(WalletState::connecting);
    }

    pub fn set_reconnecting(&self) {
        self.wallet.update(WalletState::reconnecting);
    }

    pub fn set_connected(&self, data: ConnectData) {
        self.error.set(None);
        let event = self.wallet.try_update(|state| state.connected(data)).flatten();
        self.announce(event);
    }

    pub fn set_chain(&self, chain_id: u64) {
        self.wallet.update(|state| state.chain_changed(chain_id));
    }

    pub fn set_failed(&self, error: WalletError) {
        self.wallet.update(WalletState::failed);
        self.error.set(Some(error));
    }

    /// Drop a pending attempt without reporting an error.
    pub fn cancel_pending(&self) {
        self.wallet.update(WalletState::failed);
    }

    pub fn disconnect(&self) {
        let event = self.wallet.try_update(WalletState::disconnected).flatten();
        self.announce(event);
    }

    // Emitted after the signal write so listeners observe the new state.
    fn announce(&self, event: Option<LifecycleEvent>) {
        match event {
            Some(LifecycleEvent::Connect(data)) => {
                self.events.with_value(|events| events.emit_connect(&data))
            }
            Some(LifecycleEvent::Disconnect) => {
                self.events.with_value(|events| events.emit_disconnect())
            }
            None => {}
        }
    }
}

impl Default for WalletContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_wallet_context() -> WalletContext {
    let context = WalletContext::new();
    provide_context(context);
    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
