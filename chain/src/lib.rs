//! Chain-side support for the mint app: candy machine account decoding,
//! status queries, and `mint_v2` submission through the candy guard.

pub mod accounts;
pub mod client;
pub mod error;
pub mod mint_v2;

// Solana primitives re-exported so the UI crate does not need to depend on
// the solana stack directly.
pub use anchor_client::solana_sdk::pubkey::Pubkey;
pub use anchor_client::solana_sdk::signature::{read_keypair_file, Keypair, Signature, Signer};

use std::str::FromStr;

/// Candy machine core v3 program.
pub fn candy_machine_program() -> Pubkey {
    Pubkey::from_str("CndyV3LdqHUfDLmE5naZjVN8rBZz4tqVLbtLeTHRAdA").unwrap()
}

/// Candy guard program.
pub fn candy_guard_program() -> Pubkey {
    Pubkey::from_str("Guard1JwRhJkVH6XZhzoYxeBVQe872VH6QggF4BWmS9g").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_ids_round_trip() {
        assert_eq!(
            candy_machine_program().to_string(),
            "CndyV3LdqHUfDLmE5naZjVN8rBZz4tqVLbtLeTHRAdA"
        );
        assert_eq!(
            candy_guard_program().to_string(),
            "Guard1JwRhJkVH6XZhzoYxeBVQe872VH6QggF4BWmS9g"
        );
    }
}
