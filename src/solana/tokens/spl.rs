use anyhow::{anyhow, Result};
use log::{info, warn};
use rust_decimal::Decimal;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Signature};
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use spl_token::{instruction as token_instruction, ID as TOKEN_PROGRAM_ID};

use crate::entity::{MintInfo, TokenAccountState, TokenBalance, WalletError};
use crate::solana::client::ChainRpc;
use crate::solana::tokens::transaction::send_transaction;
use crate::solana::utils::{check_decimals, from_base_units, to_base_units, token_account_address};
use crate::solana::wallet::WalletAdapter;

/// Mint lookup that also rejects decimals an amount cannot be expressed in.
pub async fn load_mint(client: &dyn ChainRpc, mint: &Pubkey) -> Result<MintInfo> {
    let mint_info = client.get_mint_info(mint).await?;
    check_decimals(mint_info.decimals)?;
    Ok(mint_info)
}

/// Balance of `mint` held in the owner's associated token account.
///
/// A missing account is not an error: it reads as zero with
/// [`TokenAccountState::Missing`]. Failing to load the mint is fatal.
pub async fn get_token_balance(
    client: &dyn ChainRpc,
    owner: &Pubkey,
    mint: &Pubkey,
    symbol: &str,
) -> Result<TokenBalance> {
    let mint_info = load_mint(client, mint)
        .await
        .map_err(|e| WalletError::MintUnavailable(e.to_string()))?;

    let token_account = token_account_address(owner, mint);

    let balance = match client.get_token_account_amount(&token_account).await? {
        Some(raw_amount) => TokenBalance {
            symbol: symbol.to_string(),
            amount: from_base_units(raw_amount, mint_info.decimals)?,
            mint_address: mint.to_string(),
            account: TokenAccountState::Existing,
        },
        None => {
            warn!(
                "Token account {} for {} does not exist yet, reporting zero balance",
                token_account, symbol
            );
            TokenBalance {
                symbol: symbol.to_string(),
                amount: Decimal::ZERO,
                mint_address: mint.to_string(),
                account: TokenAccountState::Missing,
            }
        }
    };

    Ok(balance)
}

/// Reads the balance and creates the owner's token account when it is missing,
/// so the wallet can receive `mint`.
pub async fn prepare_to_receive(
    client: &dyn ChainRpc,
    wallet: &dyn WalletAdapter,
    owner: &Pubkey,
    mint: &Pubkey,
    symbol: &str,
) -> Result<TokenBalance> {
    let mut balance = get_token_balance(client, owner, mint, symbol).await?;

    if balance.account == TokenAccountState::Missing {
        info!("Creating {} token account for {}", symbol, owner);

        let instruction =
            create_associated_token_account_idempotent(owner, owner, mint, &TOKEN_PROGRAM_ID);
        let signature = send_transaction(client, wallet, owner, &[instruction]).await?;

        balance.account = TokenAccountState::Created(signature.to_string());
    }

    Ok(balance)
}

/// Instructions moving `token_amount` base units of the mint from the sender's
/// token account to the recipient's, creating the recipient's account first
/// when it does not exist.
pub fn build_spl_transfer_instructions(
    sender: &Pubkey,
    recipient: &Pubkey,
    mint_info: &MintInfo,
    token_amount: u64,
    recipient_account_exists: bool,
) -> Result<Vec<Instruction>> {
    let sender_token_account = token_account_address(sender, &mint_info.mint);
    let recipient_token_account = token_account_address(recipient, &mint_info.mint);

    // Prepare instructions
    let mut instructions = Vec::with_capacity(2);

    if !recipient_account_exists {
        instructions.push(create_associated_token_account_idempotent(
            sender,
            recipient,
            &mint_info.mint,
            &TOKEN_PROGRAM_ID,
        ));
    }

    // Add token transfer instruction
    instructions.push(
        token_instruction::transfer_checked(
            &TOKEN_PROGRAM_ID,
            &sender_token_account,
            &mint_info.mint,
            &recipient_token_account,
            sender,
            &[],
            token_amount,
            mint_info.decimals,
        )
        .map_err(|e| anyhow!("Failed to create token transfer instruction: {}", e))?,
    );

    Ok(instructions)
}

/// Send SPL token
pub async fn send_spl_token(
    client: &dyn ChainRpc,
    wallet: &dyn WalletAdapter,
    sender: &Pubkey,
    recipient: &Pubkey,
    mint: &Pubkey,
    amount: Decimal,
) -> Result<Signature> {
    let mint_info = load_mint(client, mint).await?;

    // Convert amount to token units
    let token_amount = to_base_units(amount, mint_info.decimals)?;
    if token_amount == 0 {
        return Err(anyhow!(
            "Amount {} is below the smallest unit of the token",
            amount
        ));
    }

    // Check if recipient token account exists
    let recipient_token_account = token_account_address(recipient, mint);
    let recipient_account_exists = client.account_exists(&recipient_token_account).await?;

    let instructions = build_spl_transfer_instructions(
        sender,
        recipient,
        &mint_info,
        token_amount,
        recipient_account_exists,
    )?;

    // Execute transaction
    send_transaction(client, wallet, sender, &instructions).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mint_info() -> MintInfo {
        MintInfo {
            mint: Pubkey::new_unique(),
            decimals: 6,
        }
    }

    #[test]
    fn creates_recipient_account_before_transfer_when_missing() {
        let sender = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let mint = mint_info();

        let instructions =
            build_spl_transfer_instructions(&sender, &recipient, &mint, 2_500_000, false).unwrap();

        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].program_id, spl_associated_token_account::id());
        assert_eq!(instructions[1].program_id, TOKEN_PROGRAM_ID);
    }

    #[test]
    fn skips_account_creation_when_recipient_account_exists() {
        let sender = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let mint = mint_info();

        let instructions =
            build_spl_transfer_instructions(&sender, &recipient, &mint, 2_500_000, true).unwrap();

        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].program_id, TOKEN_PROGRAM_ID);
    }

    #[test]
    fn transfer_moves_between_derived_token_accounts() {
        let sender = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let mint = mint_info();

        let instructions =
            build_spl_transfer_instructions(&sender, &recipient, &mint, 1, true).unwrap();
        let accounts: Vec<Pubkey> = instructions[0]
            .accounts
            .iter()
            .map(|meta| meta.pubkey)
            .collect();

        // transfer_checked: source, mint, destination, authority
        assert_eq!(accounts[0], token_account_address(&sender, &mint.mint));
        assert_eq!(accounts[1], mint.mint);
        assert_eq!(accounts[2], token_account_address(&recipient, &mint.mint));
        assert_eq!(accounts[3], sender);
    }
}
