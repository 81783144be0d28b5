//! Wallet widgets: connect button and account dropdown

use leptos::prelude::*;

use crate::config::app_config;
use crate::services::wallet;
use crate::state::wallet::use_wallet_context;

/// Open/closed state of the account dropdown.
#[derive(Clone, Copy)]
pub struct WalletMenu {
    open: RwSignal<bool>,
}

impl WalletMenu {
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn toggle(&self) {
        self.open.update(|open| *open = !*open);
    }

    pub fn close(&self) {
        self.open.set(false);
    }
}

fn use_wallet_menu() -> WalletMenu {
    expect_context::<WalletMenu>()
}

#[component]
pub fn Wallet(children: Children) -> impl IntoView {
    provide_context(WalletMenu {
        open: RwSignal::new(false),
    });

    view! {
        <div class="wallet">
            {children()}
        </div>
    }
}

/// Connect button. Once connected it renders `children` and toggles the dropdown.
#[component]
pub fn ConnectWallet(
    #[prop(optional, into)] class: String,
    children: ChildrenFn,
) -> impl IntoView {
    let ctx = use_wallet_context();
    let menu = use_wallet_menu();

    let on_connect = move |_| leptos::task::spawn_local(wallet::connect(ctx));

    view! {
        <div class="wallet-connect">
            {move || {
                if ctx.is_connected() {
                    let children = children.clone();
                    view! {
                        <button
                            class=format!("wallet-button wallet-button--connected {}", class)
                            on:click=move |_| menu.toggle()
                        >
                            {children()}
                        </button>
                    }
                        .into_any()
                } else if ctx.is_pending() {
                    view! {
                        <button class=format!("wallet-button {}", class) disabled=true>
                            "Connecting..."
                        </button>
                    }
                        .into_any()
                } else {
                    view! {
                        <button class=format!("wallet-button {}", class) on:click=on_connect>
                            "Connect Wallet"
                        </button>
                    }
                        .into_any()
                }
            }}
            {move || ctx.error().map(|err| view! { <p class="wallet-error">{err.to_string()}</p> })}
        </div>
    }
}

#[component]
pub fn WalletDropdown(children: ChildrenFn) -> impl IntoView {
    let ctx = use_wallet_context();
    let menu = use_wallet_menu();

    view! {
        <Show when=move || menu.is_open() && ctx.is_connected()>
            <div class="wallet-dropdown">
                {children()}
            </div>
        </Show>
    }
}

#[component]
pub fn WalletDropdownLink(
    #[prop(into)] icon: String,
    #[prop(into)] href: String,
    children: Children,
) -> impl IntoView {
    view! {
        <a class="wallet-dropdown-item" href=href target="_blank" rel="noopener noreferrer">
            <span class=format!("wallet-icon wallet-icon--{}", icon)></span>
            {children()}
        </a>
    }
}

/// Link to the name registration page.
#[component]
pub fn WalletDropdownBasename() -> impl IntoView {
    let href = app_config().basename_url.clone();

    view! {
        <a class="wallet-dropdown-item" href=href target="_blank" rel="noopener noreferrer">
            <span class="wallet-icon wallet-icon--basename"></span>
            "Claim Basename"
        </a>
    }
}

#[component]
pub fn WalletDropdownDisconnect() -> impl IntoView {
    let ctx = use_wallet_context();
    let menu = use_wallet_menu();

    let on_disconnect = move |_| {
        menu.close();
        leptos::task::spawn_local(wallet::disconnect(ctx));
    };

    view! {
        <button class="wallet-dropdown-item wallet-dropdown-item--disconnect" on:click=on_disconnect>
            <span class="wallet-icon wallet-icon--disconnect"></span>
            "Disconnect"
        </button>
    }
}
