//! Landing page: headline, wallet widget, and the connected address

use leptos::prelude::*;

use crate::components::{
    Address, Avatar, Badge, ConnectWallet, EthBalance, Identity, Name, Wallet, WalletDropdown,
    WalletDropdownBasename, WalletDropdownDisconnect, WalletDropdownLink,
};
use crate::config::app_config;
use crate::state::connection::{address_label, use_connection_status};
use crate::state::wallet::use_wallet_context;
use crate::utils::constants::HEADLINE;

#[component]
pub fn HomePage() -> impl IntoView {
    let wallet = use_wallet_context();
    let status = use_connection_status(wallet);
    let config = app_config();

    view! {
        <div class="auth-background">
            <p class="headline">{HEADLINE}</p>
            <Wallet>
                <ConnectWallet>
                    <Avatar class="avatar-small"/>
                    <Name/>
                    <EthBalance/>
                </ConnectWallet>
                <WalletDropdown>
                    <Identity
                        class="dropdown-identity"
                        schema_id=config.schema_id.clone()
                        has_copy_address_on_click=true
                    >
                        <Avatar/>
                        <Name>
                            <Badge class="badge"/>
                        </Name>
                        <Address/>
                        <EthBalance/>
                    </Identity>
                    <WalletDropdownLink icon="wallet" href=config.wallet_url.clone()>
                        "Wallet"
                    </WalletDropdownLink>
                    <WalletDropdownBasename/>
                    <WalletDropdownDisconnect/>
                </WalletDropdown>
            </Wallet>
            <div
                class="connected-address"
                class:connected=move || status.get().is_connected()
            >
                "Address: "
                {move || address_label(wallet.address().as_deref())}
            </div>
        </div>
    }
}
