use dioxus::prelude::*;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::mint_status::{
    decrement_floor, format_price_sol, friendly_mint_error, mint_action_enabled,
    mint_one_blocking, mint_success_message, refresh_mint_status, reset_mint_status,
    CONNECT_FIRST_MESSAGE, CONNECT_TO_MINT_MESSAGE,
};
use crate::state::{SharedMintClient, WalletState};

#[component]
pub fn SelectMintPage() -> Element {
    let mut wallet = use_context::<Signal<WalletState>>();
    let client = use_context::<SharedMintClient>();
    let config = use_context::<AppConfig>();
    let catalog = use_context::<Catalog>();

    let generation = use_signal(|| 0u64);
    let loading = use_signal(|| false);
    let mut remaining = use_signal(|| None::<u64>);
    let price_lamports = use_signal(|| None::<u64>);
    let mut message = use_signal(String::new);
    let mut minting_index = use_signal(|| None::<usize>);

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

    if !connected() {
        return rsx! {
            div { class: "page",
                h2 { "Select an NFT to Mint" }
                p { class: "hint", "{CONNECT_TO_MINT_MESSAGE}" }
            }
        };
    }

    let loading_now = *loading.read();
    let remaining_now = *remaining.read();
    let price_now = *price_lamports.read();
    let minting_index_now = *minting_index.read();
    let message_now = message.read().clone();

    let supply_line = if loading_now {
        "Loading mint info...".to_string()
    } else {
        match remaining_now {
            Some(0) => "🛑 Sold out".to_string(),
            Some(n) => format!("Remaining: {n}"),
            None => "—".to_string(),
        }
    };

    rsx! {
        div { class: "page",
            h2 { "Select an NFT to Mint" }

            p { class: "status-line", "{supply_line}" }

            div { class: "nft-grid",
                for (index, item) in catalog.items().iter().enumerate() {
                    {
                        let client_for_card = client.clone();
                        let config_for_card = config.clone();
                        let card_label = if minting_index_now == Some(index) {
                            "Minting..."
                        } else if remaining_now == Some(0) {
                            "Sold out"
                        } else {
                            "Mint"
                        };
                        rsx! {
                            div { class: "nft-card", key: "{index}",
                                img { class: "nft-image", src: "{item.image_link}", alt: "{item.name}" }
                                p { class: "nft-name", "{item.name}" }

                                p { class: "nft-price",
                                    if loading_now {
                                        "Loading price..."
                                    } else if let Some(lamports) = price_now {
                                        "Price: "
                                        strong { "{format_price_sol(lamports)} SOL" }
                                    } else {
                                        "Price: —"
                                    }
                                }

                                button {
                                    class: "btn btn-card",
                                    // Any in-flight mint locks every card, not just
                                    // this one.
                                    disabled: !mint_action_enabled(
                                        minting_index_now.is_some(),
                                        loading_now,
                                        remaining_now,
                                    ),
                                    onclick: move |_| {
                                        let in_flight = minting_index.read().is_some();
                                        if !mint_action_enabled(in_flight, *loading.read(), *remaining.read()) {
                                            return;
                                        }
                                        let connected_wallet = match wallet.read().wallet.clone() {
                                            Some(w) => w,
                                            None => {
                                                message.set(CONNECT_FIRST_MESSAGE.to_string());
                                                return;
                                            }
                                        };
                                        let client = client_for_card.clone();
                                        let config = config_for_card.clone();

                                        minting_index.set(Some(index));
                                        message.set(String::new());
                                        let expected = *generation.peek();

                                        spawn(async move {
                                            let result = tokio::task::spawn_blocking(move || {
                                                mint_one_blocking(&client, &config, connected_wallet.keypair.as_ref())
                                            })
                                            .await
                                            .unwrap();

                                            minting_index.set(None);

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
                                    },
                                    "{card_label}"
                                }
                            }
                        }
                    }
                }
            }

            if !message_now.is_empty() {
                p { class: "mint-message", "{message_now}" }
            }
        }
    }
}
