use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::state::{load_wallet, ConnectionStatus, WalletState};

#[component]
pub fn WalletButton() -> Element {
    let mut wallet = use_context::<Signal<WalletState>>();
    let config = use_context::<AppConfig>();

    let status = wallet.read().connection_status.clone();
    let connected_key = wallet
        .read()
        .wallet
        .as_ref()
        .map(|w| w.public_key_base58.clone());

    let (dot_class, label) = match &status {
        ConnectionStatus::Disconnected => ("dot disconnected", "Disconnected"),
        ConnectionStatus::Connecting => ("dot connecting", "Connecting"),
        ConnectionStatus::Connected => ("dot connected", "Connected"),
        ConnectionStatus::Error(_) => ("dot error", "Error"),
    };

    let is_connected = matches!(status, ConnectionStatus::Connected);

    let connect = move |_| {
        let path = config.keypair_path.clone();
        spawn(async move {
            wallet.write().connection_status = ConnectionStatus::Connecting;
            wallet.write().last_error = None;

            let result = tokio::task::spawn_blocking(move || load_wallet(&path))
                .await
                .unwrap();

            match result {
                Ok(connected) => {
                    wallet.write().wallet = Some(connected);
                    wallet.write().connection_status = ConnectionStatus::Connected;
                }
                Err(e) => {
                    let msg = e.to_string();
                    wallet.write().connection_status = ConnectionStatus::Error(msg.clone());
                    wallet.write().last_error = Some(msg);
                }
            }
        });
    };

    let disconnect = move |_| {
        wallet.write().connection_status = ConnectionStatus::Disconnected;
        wallet.write().wallet = None;
        wallet.write().balance_lamports = None;
        wallet.write().last_error = None;
    };

    rsx! {
        div { class: "conn-indicator",
            span { class: dot_class }
            if let Some(key) = &connected_key {
                span { class: "conn-label mono", "{truncate_pubkey(key)}" }
            } else {
                span { class: "conn-label", "{label}" }
            }
            if is_connected {
                button { class: "conn-btn conn-btn-disconnect", onclick: disconnect, "Disconnect" }
            } else {
                button {
                    class: "conn-btn conn-btn-connect",
                    disabled: matches!(status, ConnectionStatus::Connecting),
                    onclick: connect,
                    "Connect Wallet"
                }
            }
        }
    }
}

fn truncate_pubkey(pubkey: &str) -> String {
    if pubkey.len() > 12 {
        format!("{}...{}", &pubkey[..6], &pubkey[pubkey.len() - 4..])
    } else {
        pubkey.to_string()
    }
}
