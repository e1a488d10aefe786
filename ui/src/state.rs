//! Shared reactive state for the mint UI.

use std::sync::{Arc, Mutex};

use cmint_chain::client::MintClient;
use cmint_chain::error::ChainError;
use cmint_chain::{read_keypair_file, Keypair, Signer};

/// Current wallet connection state.
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error(String),
}

/// A connected wallet session backed by a local keypair file.
#[derive(Clone)]
pub struct ConnectedWallet {
    pub keypair: Arc<Keypair>,
    pub public_key_base58: String,
}

/// Top-level reactive state, stored in a Dioxus `Signal`.
#[derive(Clone)]
pub struct WalletState {
    pub connection_status: ConnectionStatus,
    pub wallet: Option<ConnectedWallet>,
    pub balance_lamports: Option<u64>,
    pub last_error: Option<String>,
}

impl Default for WalletState {
    fn default() -> Self {
        Self {
            connection_status: ConnectionStatus::Disconnected,
            wallet: None,
            balance_lamports: None,
            last_error: None,
        }
    }
}

/// Thread-safe handle to the lazily constructed RPC client, shared by both
/// pages and the top bar.
pub type SharedMintClient = Arc<Mutex<Option<MintClient>>>;

/// Load the wallet keypair from disk. Runs on a blocking thread; the file
/// error is flattened to a string up front to keep the result `Send`.
pub fn load_wallet(path: &str) -> Result<ConnectedWallet, ChainError> {
    let keypair =
        read_keypair_file(path).map_err(|e| ChainError::Wallet(format!("{path}: {e}")))?;
    let public_key_base58 = keypair.pubkey().to_string();
    Ok(ConnectedWallet {
        keypair: Arc::new(keypair),
        public_key_base58,
    })
}
