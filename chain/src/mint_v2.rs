//! Candy guard `mint_v2` instruction assembly.
//!
//! The account list follows the guard program's declared order. Optional
//! accounts this app never uses (the token record, which only applies to
//! programmable NFTs) are filled with the guard program id placeholder,
//! matching what the reference SDK submits for plain NFT collections.

use std::str::FromStr;

use anchor_client::solana_sdk::instruction::{AccountMeta, Instruction};
use anchor_client::solana_sdk::pubkey::Pubkey;
use anchor_client::solana_sdk::{system_program, sysvar};

use crate::{candy_guard_program, candy_machine_program};

/// Anchor instruction discriminator: sha256("global:mint_v2")[..8].
const MINT_V2_DISCRIMINATOR: [u8; 8] = [120, 121, 23, 146, 173, 110, 199, 205];

/// Compute budget for one mint; the instruction routinely exceeds the
/// default allocation.
pub const MINT_COMPUTE_UNIT_LIMIT: u32 = 800_000;

/// Inputs for one `mint_v2` call. The payer doubles as minter, mint
/// authority for the fresh NFT, and collection update authority.
#[derive(Clone, Copy, Debug)]
pub struct MintParams {
    pub candy_guard: Pubkey,
    pub candy_machine: Pubkey,
    pub payer: Pubkey,
    pub nft_mint: Pubkey,
    pub collection_mint: Pubkey,
    pub collection_update_authority: Pubkey,
    pub sol_payment_destination: Option<Pubkey>,
}

/// Build the `mint_v2` instruction for a plain NFT mint. When the guard
/// carries a sol payment option, its destination rides along as a remaining
/// account.
pub fn build_mint_v2(params: &MintParams) -> Instruction {
    let guard_program = candy_guard_program();
    let authority_pda = machine_authority_pda(&params.candy_machine);

    let mut accounts = vec![
        AccountMeta::new_readonly(params.candy_guard, false),
        AccountMeta::new_readonly(candy_machine_program(), false),
        AccountMeta::new(params.candy_machine, false),
        AccountMeta::new(authority_pda, false),
        AccountMeta::new(params.payer, true),
        // minter
        AccountMeta::new(params.payer, true),
        AccountMeta::new(params.nft_mint, true),
        // nft mint authority
        AccountMeta::new_readonly(params.payer, true),
        AccountMeta::new(metadata_pda(&params.nft_mint), false),
        AccountMeta::new(master_edition_pda(&params.nft_mint), false),
        AccountMeta::new(associated_token_pda(&params.payer, &params.nft_mint), false),
        // token record, unused for plain NFTs
        AccountMeta::new_readonly(guard_program, false),
        AccountMeta::new_readonly(
            collection_delegate_record_pda(
                &params.collection_mint,
                &params.collection_update_authority,
                &authority_pda,
            ),
            false,
        ),
        AccountMeta::new_readonly(params.collection_mint, false),
        AccountMeta::new(metadata_pda(&params.collection_mint), false),
        AccountMeta::new_readonly(master_edition_pda(&params.collection_mint), false),
        AccountMeta::new_readonly(params.collection_update_authority, false),
        AccountMeta::new_readonly(mpl_token_metadata::ID, false),
        AccountMeta::new_readonly(spl_token_program(), false),
        AccountMeta::new_readonly(spl_ata_program(), false),
        AccountMeta::new_readonly(system_program::ID, false),
        AccountMeta::new_readonly(sysvar::instructions::ID, false),
        AccountMeta::new_readonly(sysvar::slot_hashes::ID, false),
    ];

    if let Some(destination) = params.sol_payment_destination {
        accounts.push(AccountMeta::new(destination, false));
    }

    Instruction {
        program_id: guard_program,
        accounts,
        data: mint_v2_data(),
    }
}

// Discriminator, empty mint args vec, no group label.
fn mint_v2_data() -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&MINT_V2_DISCRIMINATOR);
    data.extend_from_slice(&0u32.to_le_bytes());
    data.push(0);
    data
}

// ---------------------------------------------------------------------------
// Program ids and PDA derivations
// ---------------------------------------------------------------------------

fn spl_token_program() -> Pubkey {
    Pubkey::from_str("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").unwrap()
}

fn spl_ata_program() -> Pubkey {
    Pubkey::from_str("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL").unwrap()
}

/// Candy machine mint authority PDA.
fn machine_authority_pda(candy_machine: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[b"candy_machine", candy_machine.as_ref()],
        &candy_machine_program(),
    )
    .0
}

/// Token metadata PDA for a mint.
fn metadata_pda(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[b"metadata", mpl_token_metadata::ID.as_ref(), mint.as_ref()],
        &mpl_token_metadata::ID,
    )
    .0
}

/// Master edition PDA for a mint.
fn master_edition_pda(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            b"metadata",
            mpl_token_metadata::ID.as_ref(),
            mint.as_ref(),
            b"edition",
        ],
        &mpl_token_metadata::ID,
    )
    .0
}

/// Metadata delegate record for the candy machine's collection authority.
fn collection_delegate_record_pda(
    collection_mint: &Pubkey,
    collection_update_authority: &Pubkey,
    delegate: &Pubkey,
) -> Pubkey {
    Pubkey::find_program_address(
        &[
            b"metadata",
            mpl_token_metadata::ID.as_ref(),
            collection_mint.as_ref(),
            b"collection_delegate",
            collection_update_authority.as_ref(),
            delegate.as_ref(),
        ],
        &mpl_token_metadata::ID,
    )
    .0
}

/// Associated token account for a wallet and mint.
fn associated_token_pda(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[
            wallet.as_ref(),
            spl_token_program().as_ref(),
            mint.as_ref(),
        ],
        &spl_ata_program(),
    )
    .0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sol_payment_destination: Option<Pubkey>) -> MintParams {
        MintParams {
            candy_guard: Pubkey::new_unique(),
            candy_machine: Pubkey::new_unique(),
            payer: Pubkey::new_unique(),
            nft_mint: Pubkey::new_unique(),
            collection_mint: Pubkey::new_unique(),
            collection_update_authority: Pubkey::new_unique(),
            sol_payment_destination,
        }
    }

    #[test]
    fn account_order_and_flags() {
        let p = params(None);
        let ix = build_mint_v2(&p);

        assert_eq!(ix.program_id, candy_guard_program());
        assert_eq!(ix.accounts.len(), 23);

        let a = &ix.accounts;
        assert_eq!(a[0].pubkey, p.candy_guard);
        assert!(!a[0].is_writable && !a[0].is_signer);
        assert_eq!(a[1].pubkey, candy_machine_program());
        assert_eq!(a[2].pubkey, p.candy_machine);
        assert!(a[2].is_writable && !a[2].is_signer);
        assert_eq!(a[3].pubkey, machine_authority_pda(&p.candy_machine));
        assert!(a[3].is_writable);

        // payer, minter, nft mint, nft mint authority
        assert_eq!(a[4].pubkey, p.payer);
        assert!(a[4].is_writable && a[4].is_signer);
        assert_eq!(a[5].pubkey, p.payer);
        assert!(a[5].is_writable && a[5].is_signer);
        assert_eq!(a[6].pubkey, p.nft_mint);
        assert!(a[6].is_writable && a[6].is_signer);
        assert_eq!(a[7].pubkey, p.payer);
        assert!(!a[7].is_writable && a[7].is_signer);

        assert_eq!(a[8].pubkey, metadata_pda(&p.nft_mint));
        assert!(a[8].is_writable);
        assert_eq!(a[9].pubkey, master_edition_pda(&p.nft_mint));
        assert!(a[9].is_writable);
        assert_eq!(a[10].pubkey, associated_token_pda(&p.payer, &p.nft_mint));
        assert!(a[10].is_writable);

        // token record placeholder
        assert_eq!(a[11].pubkey, candy_guard_program());
        assert!(!a[11].is_writable && !a[11].is_signer);

        assert_eq!(
            a[12].pubkey,
            collection_delegate_record_pda(
                &p.collection_mint,
                &p.collection_update_authority,
                &machine_authority_pda(&p.candy_machine),
            )
        );
        assert_eq!(a[13].pubkey, p.collection_mint);
        assert_eq!(a[14].pubkey, metadata_pda(&p.collection_mint));
        assert!(a[14].is_writable);
        assert_eq!(a[15].pubkey, master_edition_pda(&p.collection_mint));
        assert!(!a[15].is_writable);
        assert_eq!(a[16].pubkey, p.collection_update_authority);

        assert_eq!(a[17].pubkey, mpl_token_metadata::ID);
        assert_eq!(a[18].pubkey, spl_token_program());
        assert_eq!(a[19].pubkey, spl_ata_program());
        assert_eq!(a[20].pubkey, system_program::ID);
        assert_eq!(a[21].pubkey, sysvar::instructions::ID);
        assert_eq!(a[22].pubkey, sysvar::slot_hashes::ID);
    }

    #[test]
    fn sol_payment_appends_destination() {
        let destination = Pubkey::new_unique();
        let p = params(Some(destination));
        let ix = build_mint_v2(&p);

        assert_eq!(ix.accounts.len(), 24);
        let last = ix.accounts.last().unwrap();
        assert_eq!(last.pubkey, destination);
        assert!(last.is_writable && !last.is_signer);
    }

    #[test]
    fn data_is_discriminator_empty_args_no_label() {
        let ix = build_mint_v2(&params(None));
        assert_eq!(ix.data.len(), 13);
        assert_eq!(ix.data[..8], MINT_V2_DISCRIMINATOR);
        assert_eq!(ix.data[8..12], [0, 0, 0, 0]);
        assert_eq!(ix.data[12], 0);
    }

    #[test]
    fn pdas_depend_on_their_inputs() {
        let machine_a = Pubkey::new_unique();
        let machine_b = Pubkey::new_unique();
        assert_eq!(
            machine_authority_pda(&machine_a),
            machine_authority_pda(&machine_a)
        );
        assert_ne!(
            machine_authority_pda(&machine_a),
            machine_authority_pda(&machine_b)
        );

        let mint = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        assert_ne!(metadata_pda(&mint), master_edition_pda(&mint));
        assert_ne!(
            associated_token_pda(&wallet, &mint),
            associated_token_pda(&mint, &wallet)
        );
    }
}
