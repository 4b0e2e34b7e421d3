use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

/// Decimal precision of a mint, fetched once per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintInfo {
    pub mint: Pubkey,
    pub decimals: u8,
}

/// Whether the owner's associated token account exists on chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenAccountState {
    Existing,
    /// Never created; the balance is reported as zero.
    Missing,
    /// Created by this call, with the creation signature.
    Created(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenBalance {
    pub symbol: String,
    pub amount: Decimal,
    pub mint_address: String,
    pub account: TokenAccountState,
}

impl TokenBalance {
    pub fn has_account(&self) -> bool {
        !matches!(self.account, TokenAccountState::Missing)
    }
}
