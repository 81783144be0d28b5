//! Root layout and app-wide providers

use leptos::prelude::*;

use crate::config::{app_config, AppConfig};
use crate::services::wallet;
use crate::state::wallet::provide_wallet_context;
use crate::utils::constants::FONT_VARIABLE_CLASS;

/// Wallet context for the whole app: provider listeners plus a silent
/// restore of a previously authorized session.
#[component]
pub fn Providers(children: Children) -> impl IntoView {
    let ctx = provide_wallet_context();
    wallet::install_listeners(ctx);
    leptos::task::spawn_local(wallet::reconnect(ctx));

    children()
}

#[component]
pub fn RootLayout(children: Children) -> impl IntoView {
    apply_document_metadata(app_config());

    view! {
        <div class=format!("{} font-sans antialiased", FONT_VARIABLE_CLASS)>
            <Providers>{children()}</Providers>
        </div>
    }
}

/// Set the document title and description meta tag.
fn apply_document_metadata(config: &AppConfig) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document available; metadata not applied");
        return;
    };

    document.set_title(&config.title);

    let meta = match document.query_selector("meta[name=\"description\"]") {
        Ok(Some(meta)) => meta,
        _ => {
            let Ok(meta) = document.create_element("meta") else {
                return;
            };
            if meta.set_attribute("name", "description").is_err() {
                return;
            }
            if let Some(head) = document.head() {
                if let Err(e) = head.append_child(&meta) {
                    log::warn!("Could not append description meta: {:?}", e);
                }
            }
            meta
        }
    };

    if let Err(e) = meta.set_attribute("content", &config.description) {
        log::warn!("Could not set description meta: {:?}", e);
    }
}
