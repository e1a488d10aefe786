//! Blocking RPC client for candy machine queries and mint submission.

use anchor_client::solana_client::rpc_client::RpcClient;
use anchor_client::solana_sdk::account::Account;
use anchor_client::solana_sdk::commitment_config::CommitmentConfig;
use anchor_client::solana_sdk::compute_budget::ComputeBudgetInstruction;
use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::solana_sdk::signature::{Keypair, Signature, Signer};
use anchor_client::solana_sdk::transaction::Transaction;

use crate::accounts::{GuardState, MachineState};
use crate::error::{classify, ChainError};
use crate::mint_v2::{build_mint_v2, MintParams, MINT_COMPUTE_UNIT_LIMIT};

/// Point-in-time mint status: remaining supply, and the fixed price when the
/// guard carries one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintStatus {
    pub remaining: u64,
    pub price_lamports: Option<u64>,
}

/// Receipt for a confirmed mint.
#[derive(Clone, Debug)]
pub struct MintReceipt {
    pub signature: Signature,
    pub nft_mint: Pubkey,
}

/// Blocking client bound to one candy machine and its collection. No
/// retries, no caching; every call is one snapshot of chain state.
pub struct MintClient {
    rpc: RpcClient,
    candy_machine: Pubkey,
    collection_mint: Pubkey,
}

impl MintClient {
    pub fn new(endpoint: &str, candy_machine: Pubkey, collection_mint: Pubkey) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(
                endpoint.to_string(),
                CommitmentConfig::confirmed(),
            ),
            candy_machine,
            collection_mint,
        }
    }

    /// Fetch and decode the candy machine account.
    pub fn machine_state(&self) -> Result<MachineState, ChainError> {
        let account = self.fetch_account(&self.candy_machine)?;
        MachineState::decode(&account)
    }

    /// Fetch and decode the candy guard account at `mint_authority`.
    pub fn guard_state(&self, mint_authority: &Pubkey) -> Result<GuardState, ChainError> {
        let account = self.fetch_account(mint_authority)?;
        GuardState::decode(&account)
    }

    /// Remaining supply and price in one pass: the machine account first,
    /// then the guard it designates as mint authority.
    pub fn mint_status(&self) -> Result<MintStatus, ChainError> {
        let machine = self.machine_state()?;
        let guard = self.guard_state(&machine.mint_authority)?;
        Ok(MintStatus {
            remaining: machine.supply.remaining(),
            price_lamports: guard.sol_payment.map(|p| p.lamports),
        })
    }

    /// Lamport balance of an account.
    pub fn balance(&self, pubkey: &Pubkey) -> Result<u64, ChainError> {
        self.rpc.get_balance(pubkey).map_err(classify)
    }

    /// Mint one item: fresh NFT mint keypair, `mint_v2` through the guard,
    /// confirmed before returning.
    ///
    /// The wallet acts as payer, minter, and collection update authority.
    /// Remaining supply is not re-checked here; the program is the authority
    /// on whether the mint goes through.
    pub fn mint_one(&self, payer: &Keypair) -> Result<MintReceipt, ChainError> {
        let machine = self.machine_state()?;
        let guard = self.guard_state(&machine.mint_authority)?;

        let nft_mint = Keypair::new();
        let params = MintParams {
            candy_guard: machine.mint_authority,
            candy_machine: self.candy_machine,
            payer: payer.pubkey(),
            nft_mint: nft_mint.pubkey(),
            collection_mint: self.collection_mint,
            collection_update_authority: payer.pubkey(),
            sol_payment_destination: guard.sol_payment.map(|p| p.destination),
        };

        let instructions = [
            ComputeBudgetInstruction::set_compute_unit_limit(MINT_COMPUTE_UNIT_LIMIT),
            build_mint_v2(&params),
        ];

        let blockhash = self.rpc.get_latest_blockhash().map_err(classify)?;
        let transaction = Transaction::new_signed_with_payer(
            &instructions,
            Some(&params.payer),
            &[payer, &nft_mint],
            blockhash,
        );

        let signature = self
            .rpc
            .send_and_confirm_transaction(&transaction)
            .map_err(classify)?;

        log::info!("mint confirmed: {signature}");

        Ok(MintReceipt {
            signature,
            nft_mint: params.nft_mint,
        })
    }

    fn fetch_account(&self, pubkey: &Pubkey) -> Result<Account, ChainError> {
        let response = self
            .rpc
            .get_account_with_commitment(pubkey, self.rpc.commitment())
            .map_err(classify)?;
        response.value.ok_or(ChainError::AccountNotFound(*pubkey))
    }
}
