use anyhow::{anyhow, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

use crate::solana::tokens::constants::SOL_DECIMALS;

/// Largest scale a `Decimal` can carry. Mints declaring more decimals are not supported.
pub const MAX_TOKEN_DECIMALS: u8 = 28;

pub fn check_decimals(decimals: u8) -> Result<u8> {
    if decimals > MAX_TOKEN_DECIMALS {
        return Err(anyhow!(
            "Token decimals {} exceed the supported maximum of {}",
            decimals,
            MAX_TOKEN_DECIMALS
        ));
    }
    Ok(decimals)
}

/// Convert raw on-chain units to a decimal amount: `raw / 10^decimals`.
pub fn from_base_units(raw: u64, decimals: u8) -> Result<Decimal> {
    let scale = check_decimals(decimals)?;
    Ok(Decimal::from_i128_with_scale(raw as i128, scale as u32))
}

/// Convert a decimal amount to raw units, truncating precision the token cannot hold.
pub fn to_base_units(amount: Decimal, decimals: u8) -> Result<u64> {
    let scale = check_decimals(decimals)?;
    // 10^28 still fits the 96-bit mantissa
    let factor = Decimal::from_i128_with_scale(10i128.pow(scale as u32), 0);

    amount
        .checked_mul(factor)
        .and_then(|units| units.trunc().to_u64())
        .ok_or_else(|| anyhow!("Amount {} is out of range", amount))
}

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> Decimal {
    Decimal::from_i128_with_scale(lamports as i128, SOL_DECIMALS as u32)
}

/// Associated token account of `owner` for `mint`.
pub fn token_account_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(owner, mint)
}
