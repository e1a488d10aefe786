use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::mint_status::{
    decrement_floor, format_price_sol, friendly_mint_error, mint_action_enabled,
    mint_one_blocking, mint_success_message, refresh_mint_status, reset_mint_status,
    CONNECT_FIRST_MESSAGE, CONNECT_TO_MINT_MESSAGE,
};
use crate::state::{SharedMintClient, WalletState};

#[component]
pub fn RandomMintPage() -> Element {
    let mut wallet = use_context::<Signal<WalletState>>();
    let client = use_context::<SharedMintClient>();
    let config = use_context::<AppConfig>();

    let generation = use_signal(|| 0u64);
    let loading = use_signal(|| false);
    let mut remaining = use_signal(|| None::<u64>);
    let price_lamports = use_signal(|| None::<u64>);
    let mut message = use_signal(String::new);
    let mut minting = use_signal(|| false);

    let connected = use_memo(move || wallet.read().wallet.is_some());

    // Fetch on connect, clear on disconnect.
    {
        let client = client.clone();
        let config_for_effect = config.clone();
        use_effect(move || {
            if connected() {
                refresh_mint_status(
                    client.clone(),
                    config_for_effect.clone(),
                    generation,
                    loading,
                    remaining,
                    price_lamports,
                    message,
                );
            } else {
                reset_mint_status(generation, loading, remaining, price_lamports, message);
            }
        });
    }

    let on_mint = {
        let client = client.clone();
        let config = config.clone();
        move |_| {
            if !mint_action_enabled(*minting.read(), *loading.read(), *remaining.read()) {
                return;
            }
            let connected_wallet = match wallet.read().wallet.clone() {
                Some(w) => w,
                None => {
                    message.set(CONNECT_FIRST_MESSAGE.to_string());
                    return;
                }
            };
            let client = client.clone();
            let config = config.clone();

            minting.set(true);
            message.set(String::new());
            let expected = *generation.peek();

            spawn(async move {
                let result = tokio::task::spawn_blocking(move || {
                    mint_one_blocking(&client, &config, connected_wallet.keypair.as_ref())
                })
                .await
                .unwrap();

                minting.set(false);

                // Don't touch state a disconnect has already cleared.
                if *generation.peek() != expected {
                    return;
                }

                match result {
                    Ok(receipt) => {
                        message.set(mint_success_message(&receipt.signature));
                        let next_remaining = decrement_floor(*remaining.peek());
                        remaining.set(next_remaining);
                        wallet.write().balance_lamports = None;
                    }
                    Err(e) => {
                        log::error!("mint failed: {e}");
                        message.set(friendly_mint_error(&e));
                    }
                }
            });
        }
    };

    if !connected() {
        return rsx! {
            div { class: "page",
                h1 { "Random Mint" }
                p { class: "hint", "{CONNECT_TO_MINT_MESSAGE}" }
            }
        };
    }

    let loading_now = *loading.read();
    let remaining_now = *remaining.read();
    let price_now = *price_lamports.read();
    let minting_now = *minting.read();
    let message_now = message.read().clone();

    let supply_line = if loading_now {
        "Loading mint info...".to_string()
    } else {
        match remaining_now {
            Some(0) => "🛑 Sold out".to_string(),
            Some(n) => format!("Remaining NFTs: {n}"),
            None => "Remaining NFTs: —".to_string(),
        }
    };

    let button_label = if minting_now {
        "Minting..."
    } else if remaining_now == Some(0) {
        "Sold out"
    } else {
        "Mint NFT"
    };

    rsx! {
        div { class: "page",
            h1 { "Random Mint" }
            p { class: "subtitle", "Mint the next NFT in line from the candy machine." }

            p { class: "status-line", "{supply_line}" }

            p { class: "price-line",
                "Mint Price: "
                if loading_now {
                    "Loading..."
                } else if let Some(lamports) = price_now {
                    strong { "{format_price_sol(lamports)} SOL" }
                } else {
                    "—"
                }
            }

            if remaining_now == Some(0) && !loading_now {
                p { class: "soldout-note", "🛑 Sold out" }
            }

            button {
                class: "btn btn-primary",
                disabled: !mint_action_enabled(minting_now, loading_now, remaining_now),
                onclick: on_mint,
                "{button_label}"
            }

            if !message_now.is_empty() {
                p { class: "mint-message", "{message_now}" }
            }
        }
    }
}
