//! Connection state tracking for views
//!
//! A view that needs to know whether an account is connected mirrors the
//! lifecycle events it observes into a local [`ConnectionStatus`]. The status
//! is not read from the wallet; it only reflects the most recent event seen
//! since the view was mounted.

use leptos::prelude::*;
use shared::dto::wallet::ConnectData;

use crate::services::events::{AccountHandlers, Subscription};
use crate::state::wallet::WalletContext;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionStatus {
    pub fn is_connected(self) -> bool {
        self == ConnectionStatus::Connected
    }

    /// Record a connect event. Every call is logged, including repeats.
    pub fn on_connect(&mut self, data: &ConnectData) {
        log::info!("account connected: {:?}", data);
        *self = ConnectionStatus::Connected;
    }

    pub fn on_disconnect(&mut self) {
        *self = ConnectionStatus::Disconnected;
    }
}

/// Mirror lifecycle events from `wallet` into `status` while the guard lives.
pub fn track_connection(
    wallet: &WalletContext,
    status: RwSignal<ConnectionStatus>,
) -> Subscription {
    wallet.subscribe(
        AccountHandlers::new()
            .on_connect(move |data| status.update(|s| s.on_connect(data)))
            .on_disconnect(move || status.update(ConnectionStatus::on_disconnect)),
    )
}

/// Create a status signal for the current view and keep it subscribed until
/// the view's owner is cleaned up.
pub fn use_connection_status(wallet: WalletContext) -> RwSignal<ConnectionStatus> {
    let status = RwSignal::new(ConnectionStatus::default());
    let subscription = track_connection(&wallet, status);
    on_cleanup(move || drop(subscription));
    status
}

/// Text shown for the current account: empty when there is none.
pub fn address_label(address: Option<&str>) -> String {
    address.unwrap_or_default().to_string()
}
