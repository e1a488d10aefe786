//! Candy machine and candy guard account decoding.
//!
//! Layouts follow the deployed v3 programs. Only the fields this app reads
//! are decoded, at fixed offsets, so no IDL machinery is needed.

use anchor_client::solana_sdk::account::Account;
use anchor_client::solana_sdk::pubkey::Pubkey;

use crate::error::ChainError;
use crate::{candy_guard_program, candy_machine_program};

/// Anchor account discriminator: sha256("account:CandyMachine")[..8].
const CANDY_MACHINE_DISCRIMINATOR: [u8; 8] = [51, 173, 177, 113, 25, 241, 109, 189];
/// Anchor account discriminator: sha256("account:CandyGuard")[..8].
const CANDY_GUARD_DISCRIMINATOR: [u8; 8] = [44, 207, 199, 184, 112, 103, 34, 181];

// Guard feature bits, in the guard program's enum order.
const GUARD_BOT_TAX: u64 = 1 << 0;
const GUARD_SOL_PAYMENT: u64 = 1 << 1;

// Serialized bot tax guard: lamports u64 + last_instruction bool.
const BOT_TAX_LEN: usize = 9;
// Serialized sol payment guard: lamports u64 + destination pubkey.
const SOL_PAYMENT_LEN: usize = 40;

// ---------------------------------------------------------------------------
// Supply normalization
// ---------------------------------------------------------------------------

/// Canonical supply counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Supply {
    pub available: u64,
    pub minted: u64,
}

impl Supply {
    /// Items still mintable; zero whenever the counters cross.
    pub fn remaining(&self) -> u64 {
        self.available.saturating_sub(self.minted)
    }
}

/// Supply counters as surfaced on chain, before normalization.
///
/// Older IDL vocabularies call the running counter `items_minted`, the
/// current program calls it `items_redeemed`. `normalize` picks the first
/// populated counter in that order, so every accepted shape is explicit
/// rather than probed field by field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawSupply {
    pub items_available: Option<u64>,
    pub items_minted: Option<u64>,
    pub items_redeemed: Option<u64>,
}

impl RawSupply {
    pub fn normalize(self) -> Supply {
        Supply {
            available: self.items_available.unwrap_or(0),
            minted: self.items_minted.or(self.items_redeemed).unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Candy machine account
// ---------------------------------------------------------------------------

/// Decoded candy machine account.
#[derive(Clone, Debug, PartialEq)]
pub struct MachineState {
    pub authority: Pubkey,
    pub mint_authority: Pubkey,
    pub collection_mint: Pubkey,
    pub supply: Supply,
}

// Candy machine account layout (v3):
//   0..8     discriminator
//   8..16    account version, token standard, feature flags
//   16..48   authority
//   48..80   mint authority
//   80..112  collection mint
//   112..120 items_redeemed (u64 le)
//   120..128 config data, starting with items_available (u64 le)
const MACHINE_MIN_LEN: usize = 128;

impl MachineState {
    pub fn decode(account: &Account) -> Result<Self, ChainError> {
        if account.owner != candy_machine_program() {
            return Err(ChainError::IncorrectOwner(account.owner));
        }
        let data = &account.data;
        if data.len() < MACHINE_MIN_LEN {
            return Err(ChainError::Decode(format!(
                "candy machine account too short: {} bytes",
                data.len()
            )));
        }
        if data[..8] != CANDY_MACHINE_DISCRIMINATOR {
            return Err(ChainError::Decode(
                "candy machine discriminator mismatch".to_string(),
            ));
        }

        let raw = RawSupply {
            items_available: Some(read_u64(data, 120)),
            items_minted: None,
            items_redeemed: Some(read_u64(data, 112)),
        };

        Ok(Self {
            authority: read_pubkey(data, 16),
            mint_authority: read_pubkey(data, 48),
            collection_mint: read_pubkey(data, 80),
            supply: raw.normalize(),
        })
    }
}

// ---------------------------------------------------------------------------
// Candy guard account
// ---------------------------------------------------------------------------

/// The sol payment guard option: fixed price and its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolPayment {
    pub lamports: u64,
    pub destination: Pubkey,
}

/// Decoded candy guard account, reduced to the guard options this app acts
/// on. Guard groups are ignored; only the default guard set is read.
#[derive(Clone, Debug, PartialEq)]
pub struct GuardState {
    pub authority: Pubkey,
    pub sol_payment: Option<SolPayment>,
}

// Candy guard account layout:
//   0..8   discriminator
//   8..40  base
//   40     bump
//   41..73 authority
//   73..81 guard feature bitmask (u64 le)
//   81..   enabled guards, packed in bit order
const GUARD_MIN_LEN: usize = 81;

impl GuardState {
    pub fn decode(account: &Account) -> Result<Self, ChainError> {
        if account.owner != candy_guard_program() {
            return Err(ChainError::IncorrectOwner(account.owner));
        }
        let data = &account.data;
        if data.len() < GUARD_MIN_LEN {
            return Err(ChainError::Decode(format!(
                "candy guard account too short: {} bytes",
                data.len()
            )));
        }
        if data[..8] != CANDY_GUARD_DISCRIMINATOR {
            return Err(ChainError::Decode(
                "candy guard discriminator mismatch".to_string(),
            ));
        }

        let features = read_u64(data, 73);
        let mut cursor = GUARD_MIN_LEN;
        if features & GUARD_BOT_TAX != 0 {
            cursor += BOT_TAX_LEN;
        }
        let sol_payment = if features & GUARD_SOL_PAYMENT != 0 {
            if data.len() < cursor + SOL_PAYMENT_LEN {
                return Err(ChainError::Decode("sol payment guard truncated".to_string()));
            }
            Some(SolPayment {
                lamports: read_u64(data, cursor),
                destination: read_pubkey(data, cursor + 8),
            })
        } else {
            None
        };

        Ok(Self {
            authority: read_pubkey(data, 41),
            sol_payment,
        })
    }
}

fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(buf)
}

fn read_pubkey(data: &[u8], offset: usize) -> Pubkey {
    let mut buf = [0u8; 32];
    buf.copy_from_slice(&data[offset..offset + 32]);
    Pubkey::new_from_array(buf)
}
