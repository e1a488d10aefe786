pub mod layout;
pub mod random_mint;
pub mod select_mint;
pub mod wallet_button;
