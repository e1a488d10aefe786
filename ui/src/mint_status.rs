//! Mint status fetch and the view-state helpers both pages share.

use dioxus::prelude::*;

use cmint_chain::client::{MintClient, MintReceipt};
use cmint_chain::error::ChainError;
use cmint_chain::{Keypair, Signature};

use crate::config::AppConfig;
use crate::state::SharedMintClient;

const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

pub const NOT_FOUND_MESSAGE: &str = "Candy Machine not found.";
pub const CONNECT_FIRST_MESSAGE: &str = "Please connect your wallet first.";
pub const CONNECT_TO_MINT_MESSAGE: &str = "🔌 Please connect your wallet to mint an NFT.";

/// Fetch remaining supply and price off-thread and apply the result, unless
/// a newer refresh or a reset has bumped the generation in the meantime.
/// Stale results are discarded, not cancelled.
pub fn refresh_mint_status(
    client: SharedMintClient,
    config: AppConfig,
    mut generation: Signal<u64>,
    mut loading: Signal<bool>,
    mut remaining: Signal<Option<u64>>,
    mut price_lamports: Signal<Option<u64>>,
    mut message: Signal<String>,
) {
    let expected = generation.peek().wrapping_add(1);
    generation.set(expected);
    loading.set(true);
    message.set(String::new());

    spawn(async move {
        let result = tokio::task::spawn_blocking(move || {
            let mut guard = client.lock().unwrap();
            let client = guard.get_or_insert_with(|| {
                MintClient::new(&config.rpc_url, config.candy_machine, config.collection_mint)
            });
            client.mint_status()
        })
        .await
        .unwrap();

        if *generation.peek() != expected {
            return;
        }
        loading.set(false);

        match result {
            Ok(status) => {
                remaining.set(Some(status.remaining));
                price_lamports.set(status.price_lamports);
            }
            Err(e) => {
                log::error!("candy machine fetch failed: {e}");
                remaining.set(None);
                price_lamports.set(None);
                message.set(NOT_FOUND_MESSAGE.to_string());
            }
        }
    });
}

/// Disconnect path: drop every derived value and invalidate any in-flight
/// fetch.
pub fn reset_mint_status(
    mut generation: Signal<u64>,
    mut loading: Signal<bool>,
    mut remaining: Signal<Option<u64>>,
    mut price_lamports: Signal<Option<u64>>,
    mut message: Signal<String>,
) {
    let next = generation.peek().wrapping_add(1);
    generation.set(next);
    loading.set(false);
    remaining.set(None);
    price_lamports.set(None);
    message.set(String::new());
}

/// Blocking mint call used by both pages' handlers.
pub fn mint_one_blocking(
    client: &SharedMintClient,
    config: &AppConfig,
    payer: &Keypair,
) -> Result<MintReceipt, ChainError> {
    let mut guard = client.lock().unwrap();
    let client = guard.get_or_insert_with(|| {
        MintClient::new(&config.rpc_url, config.candy_machine, config.collection_mint)
    });
    client.mint_one(payer)
}

/// One action at a time: in-flight, still loading, and sold out all disable
/// the mint button. Unknown remaining does not.
pub fn mint_action_enabled(in_flight: bool, loading: bool, remaining: Option<u64>) -> bool {
    !in_flight && !loading && remaining != Some(0)
}

/// Optimistic post-mint update, floored at zero. Unknown stays unknown.
pub fn decrement_floor(remaining: Option<u64>) -> Option<u64> {
    remaining.map(|n| n.saturating_sub(1))
}

/// Lamports rendered as SOL with two decimals.
pub fn format_price_sol(lamports: u64) -> String {
    format!("{:.2}", lamports as f64 / LAMPORTS_PER_SOL)
}

/// Explorer link for a confirmed signature. The cluster tag stays devnet,
/// matching the endpoint the app ships against.
pub fn mint_success_message(signature: &Signature) -> String {
    format!(
        "✅ Mint success. View on explorer: https://explorer.solana.com/tx/{signature}?cluster=devnet"
    )
}

/// One-line user message for a failed mint.
pub fn friendly_mint_error(err: &ChainError) -> String {
    match err {
        ChainError::InsufficientFunds => {
            "❌ Insufficient SOL on devnet. Please airdrop and try again.".to_string()
        }
        ChainError::Rejected(_) => "⛔ Transaction rejected by wallet.".to_string(),
        _ => "❌ Mint failed. Check your balance and guard requirements, then try again."
            .to_string(),
    }
}
