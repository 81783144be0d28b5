//! Identity widgets: avatar, name, badge, address, balance
//!
//! Inside an [`Identity`] block the widgets read the identity context it
//! provides. Outside one (for example inside the connect button) they fall
//! back to the connected account.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use shared::utils::truncate_address;

use crate::config::app_config;
use crate::services::{rpc, wallet};
use crate::state::wallet::use_wallet_context;
use crate::utils::constants::COPY_FEEDBACK_MS;
use crate::utils::format::format_balance;

#[derive(Clone)]
pub struct IdentityContext {
    pub address: Signal<Option<String>>,
    pub schema_id: Option<String>,
    pub copy_on_click: bool,
}

impl IdentityContext {
    fn connected_account() -> Self {
        let wallet = use_wallet_context();
        Self {
            address: Signal::derive(move || wallet.address()),
            schema_id: None,
            copy_on_click: false,
        }
    }
}

pub fn use_identity() -> IdentityContext {
    use_context::<IdentityContext>().unwrap_or_else(IdentityContext::connected_account)
}

/// Two gradient colours derived from the address (FNV-1a, case-insensitive).
pub fn avatar_colors(address: &str) -> (String, String) {
    let hash = address
        .bytes()
        .map(|b| b.to_ascii_lowercase())
        .fold(0xcbf2_9ce4_8422_2325u64, |hash, b| {
            (hash ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
        });

    let first = hash % 360;
    let second = (hash >> 16) % 360;
    (
        format!("hsl({}, 70%, 55%)", first),
        format!("hsl({}, 75%, 45%)", second),
    )
}

#[component]
pub fn Identity(
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] schema_id: String,
    #[prop(optional)] has_copy_address_on_click: bool,
    children: Children,
) -> impl IntoView {
    let wallet = use_wallet_context();
    provide_context(IdentityContext {
        address: Signal::derive(move || wallet.address()),
        schema_id: Some(schema_id).filter(|s| !s.is_empty()),
        copy_on_click: has_copy_address_on_click,
    });

    view! {
        <div class=format!("identity {}", class)>
            {children()}
        </div>
    }
}

#[component]
pub fn Avatar(#[prop(optional, into)] class: String) -> impl IntoView {
    let identity = use_identity();
    let style = move || {
        identity
            .address
            .get()
            .map(|address| {
                let (from, to) = avatar_colors(&address);
                format!("background: linear-gradient(135deg, {}, {});", from, to)
            })
            .unwrap_or_default()
    };

    view! {
        <span class=format!("identity-avatar {}", class) style=style></span>
    }
}

/// Display name. Name services are not queried; this is the shortened address.
#[component]
pub fn Name(#[prop(optional)] children: Option<Children>) -> impl IntoView {
    let identity = use_identity();
    let label = move || {
        identity
            .address
            .get()
            .map(|address| truncate_address(&address))
            .unwrap_or_default()
    };

    view! {
        <span class="identity-name">
            {label}
            {children.map(|children| children())}
        </span>
    }
}

/// Attestation badge; hidden when the enclosing identity has no schema.
#[component]
pub fn Badge(#[prop(optional, into)] class: String) -> impl IntoView {
    let identity = use_identity();
    identity.schema_id.map(|schema| {
        view! {
            <span
                class=format!("identity-badge {}", class)
                title=format!("Attested under schema {}", schema)
            >
                "\u{2713}"
            </span>
        }
    })
}

#[component]
pub fn Address() -> impl IntoView {
    let identity = use_identity();
    let address = identity.address;
    let copy_on_click = identity.copy_on_click;
    let copied = RwSignal::new(false);

    let on_click = move |_| {
        if !copy_on_click {
            return;
        }
        let Some(full) = address.get_untracked() else {
            return;
        };
        leptos::task::spawn_local(async move {
            match wallet::copy_to_clipboard(&full).await {
                Ok(()) => {
                    copied.try_set(true);
                    TimeoutFuture::new(COPY_FEEDBACK_MS).await;
                    copied.try_set(false);
                }
                Err(err) => log::warn!("Copy to clipboard failed: {}", err),
            }
        });
    };

    let label = move || {
        if copied.get() {
            "Copied".to_string()
        } else {
            address
                .get()
                .map(|address| truncate_address(&address))
                .unwrap_or_default()
        }
    };

    view! {
        <span
            class=move || if copy_on_click { "identity-address identity-address--copy" } else { "identity-address" }
            on:click=on_click
        >
            {label}
        </span>
    }
}

/// Account whose balance the configured node can report. A wallet on another
/// chain gets the placeholder instead of the node chain's balance.
pub fn balance_target(
    address: Option<String>,
    wallet_chain: Option<u64>,
    node_chain: u64,
) -> Option<String> {
    address.filter(|_| wallet_chain == Some(node_chain))
}

#[component]
pub fn EthBalance() -> impl IntoView {
    let address = use_identity().address;
    let wallet = use_wallet_context();
    let balance = RwSignal::new(None::<u128>);

    Effect::new(move || {
        let target = balance_target(address.get(), wallet.chain_id(), app_config().chain_id);
        balance.set(None);
        let Some(current) = target else {
            return;
        };

        leptos::task::spawn_local(async move {
            let result = rpc::get_balance(&app_config().rpc_url, &current).await;
            // Drop responses for an account or chain that is no longer shown.
            let shown = balance_target(
                address.try_get_untracked().flatten(),
                wallet.wallet.try_with_untracked(|state| state.chain_id()).flatten(),
                app_config().chain_id,
            );
            if shown.as_deref() != Some(current.as_str()) {
                return;
            }
            match result {
                Ok(wei) => {
                    balance.try_set(Some(wei));
                }
                Err(err) => log::warn!("Balance lookup for {} failed: {}", current, err),
            }
        });
    });

    view! {
        <span class="identity-balance">{move || format_balance(balance.get())}</span>
    }
}
