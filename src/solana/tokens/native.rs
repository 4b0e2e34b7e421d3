use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Signature, system_instruction};

use crate::solana::client::ChainRpc;
use crate::solana::tokens::constants::SOL_DECIMALS;
use crate::solana::tokens::transaction::send_transaction;
use crate::solana::utils::{lamports_to_sol, to_base_units};
use crate::solana::wallet::WalletAdapter;

/// Get SOL balance
pub async fn get_sol_balance(client: &dyn ChainRpc, address: &Pubkey) -> Result<Decimal> {
    let balance = client.get_sol_balance(address).await?;

    // Convert from lamports to SOL
    Ok(lamports_to_sol(balance))
}

/// Instructions moving `lamports` from `sender` to `recipient`.
pub fn build_sol_transfer_instructions(
    sender: &Pubkey,
    recipient: &Pubkey,
    lamports: u64,
) -> Vec<Instruction> {
    vec![system_instruction::transfer(sender, recipient, lamports)]
}

/// Send SOL
pub async fn send_sol(
    client: &dyn ChainRpc,
    wallet: &dyn WalletAdapter,
    sender: &Pubkey,
    recipient: &Pubkey,
    amount: Decimal,
) -> Result<Signature> {
    // Convert amount to lamports
    let lamports = to_base_units(amount, SOL_DECIMALS)?;
    if lamports == 0 {
        return Err(anyhow!("Amount {} SOL is below one lamport", amount));
    }

    let instructions = build_sol_transfer_instructions(sender, recipient, lamports);

    // Execute transaction
    send_transaction(client, wallet, sender, &instructions).await
}
