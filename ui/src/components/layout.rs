use dioxus::prelude::*;

use cmint_chain::Signer;

use super::wallet_button::WalletButton;
use crate::config::AppConfig;
use crate::state::{SharedMintClient, WalletState};
use crate::Route;

const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

#[component]
pub fn TopBar() -> Element {
    let wallet = use_context::<Signal<WalletState>>();
    let client = use_context::<SharedMintClient>();
    let config = use_context::<AppConfig>();

    let balance = wallet.read().balance_lamports;

    // Auto-fetch once connected, and again whenever the balance is
    // invalidated after a mint.
    {
        let client = client.clone();
        use_effect(move || {
            let needs_fetch =
                wallet.read().wallet.is_some() && wallet.read().balance_lamports.is_none();
            if needs_fetch {
                fetch_balance(wallet, client.clone(), config.clone());
            }
        });
    }

    rsx! {
        header { class: "topbar",
            div { class: "topbar-brand",
                span { class: "brand-icon", "◉" }
                span { class: "brand-text", "Candy Mint" }
            }
            nav { class: "topbar-nav",
                NavLink { to: Route::RandomMint {}, label: "🎲 Random Mint" }
                NavLink { to: Route::SelectMint {}, label: "🖼️ Select Mint" }
            }
            div { class: "topbar-right",
                if let Some(lamports) = balance {
                    div { class: "topbar-balance",
                        span { class: "topbar-label", "Balance" }
                        span { class: "topbar-value", "{format_sol(lamports)} SOL" }
                    }
                }
                WalletButton {}
            }
        }
    }
}

fn fetch_balance(mut wallet: Signal<WalletState>, client: SharedMintClient, config: AppConfig) {
    let pubkey = match &wallet.read().wallet {
        Some(w) => w.keypair.pubkey(),
        None => return,
    };

    spawn(async move {
        let result = tokio::task::spawn_blocking(move || {
            let mut guard = client.lock().unwrap();
            let client = guard.get_or_insert_with(|| {
                cmint_chain::client::MintClient::new(
                    &config.rpc_url,
                    config.candy_machine,
                    config.collection_mint,
                )
            });
            client.balance(&pubkey)
        })
        .await
        .unwrap();

        match result {
            Ok(lamports) => {
                wallet.write().balance_lamports = Some(lamports);
            }
            // Writing an error into the wallet signal would re-run the
            // fetch effect, so a failed balance read only logs.
            Err(e) => {
                log::warn!("balance fetch failed: {e}");
            }
        }
    });
}

#[component]
fn NavLink(to: Route, label: &'static str) -> Element {
    rsx! {
        Link { class: "nav-link", to: to, "{label}" }
    }
}

fn format_sol(lamports: u64) -> String {
    let sol = lamports as f64 / LAMPORTS_PER_SOL;
    if sol == 0.0 {
        "0".to_string()
    } else if sol < 0.001 {
        format!("{sol:.9}")
    } else {
        format!("{sol:.4}")
    }
}
