use anyhow::{anyhow, Result};
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, pubkey::Pubkey, signature::Signature,
    transaction::Transaction,
};
use solana_transaction_status::{TransactionConfirmationStatus, UiTransactionEncoding};
use spl_token::solana_program::program_pack::Pack;
use std::str::FromStr;
use std::sync::Arc;

use crate::entity::{ConfirmationStatus, MintInfo, ParsedTransaction, SignatureRef, WalletError};
use crate::solana::parse::parse_confirmed_transaction;

/// Network reads and submission the wallet needs from a Solana node.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn get_mint_info(&self, mint: &Pubkey) -> Result<MintInfo>;

    /// Raw token amount held by a token account, `None` if the account does not exist.
    async fn get_token_account_amount(&self, token_account: &Pubkey) -> Result<Option<u64>>;

    /// Lamports held by an address.
    async fn get_sol_balance(&self, address: &Pubkey) -> Result<u64>;

    async fn account_exists(&self, address: &Pubkey) -> Result<bool>;

    /// Most recent signatures touching `address`, newest first.
    async fn get_signatures_for_address(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> Result<Vec<SignatureRef>>;

    /// Full parsed record, `None` when the node has nothing usable for it.
    async fn get_parsed_transaction(&self, signature: &str) -> Result<Option<ParsedTransaction>>;

    async fn get_latest_blockhash(&self) -> Result<Hash>;

    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature>;
}

/// `ChainRpc` backed by the nonblocking JSON-RPC client.
pub struct RpcChain {
    client: RpcClient,
}

impl RpcChain {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }
}

/// Create a Solana client with confirmed commitment
pub fn create_solana_client(rpc_url: &str) -> Result<Arc<RpcChain>> {
    let client = RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed());

    Ok(Arc::new(RpcChain::new(client)))
}

fn confirmation_status(status: Option<TransactionConfirmationStatus>) -> ConfirmationStatus {
    match status {
        Some(TransactionConfirmationStatus::Processed) => ConfirmationStatus::Processed,
        Some(TransactionConfirmationStatus::Finalized) => ConfirmationStatus::Finalized,
        _ => ConfirmationStatus::Confirmed,
    }
}

#[async_trait]
impl ChainRpc for RpcChain {
    async fn get_mint_info(&self, mint: &Pubkey) -> Result<MintInfo> {
        let account = self
            .client
            .get_account(mint)
            .await
            .map_err(|e| WalletError::SolanaClient(format!("failed to get mint info: {}", e)))?;

        let state = spl_token::state::Mint::unpack(&account.data)
            .map_err(|e| anyhow!("Account {} is not a token mint: {}", mint, e))?;

        Ok(MintInfo {
            mint: *mint,
            decimals: state.decimals,
        })
    }

    async fn get_token_account_amount(&self, token_account: &Pubkey) -> Result<Option<u64>> {
        let response = self
            .client
            .get_account_with_commitment(token_account, self.client.commitment())
            .await
            .map_err(|e| WalletError::SolanaClient(format!("failed to get token account: {}", e)))?;

        match response.value {
            Some(account) => {
                let state = spl_token::state::Account::unpack(&account.data).map_err(|e| {
                    anyhow!("Account {} is not a token account: {}", token_account, e)
                })?;
                Ok(Some(state.amount))
            }
            None => Ok(None),
        }
    }

    async fn get_sol_balance(&self, address: &Pubkey) -> Result<u64> {
        self.client
            .get_balance(address)
            .await
            .map_err(|e| WalletError::SolanaClient(format!("failed to get balance: {}", e)).into())
    }

    async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        let response = self
            .client
            .get_account_with_commitment(address, self.client.commitment())
            .await
            .map_err(|e| {
                WalletError::SolanaClient(format!("failed to get account {}: {}", address, e))
            })?;

        Ok(response.value.is_some())
    }

    async fn get_signatures_for_address(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> Result<Vec<SignatureRef>> {
        let config = GetConfirmedSignaturesForAddress2Config {
            limit: Some(limit),
            commitment: Some(self.client.commitment()),
            ..Default::default()
        };

        let statuses = self
            .client
            .get_signatures_for_address_with_config(address, config)
            .await
            .map_err(|e| {
                WalletError::SolanaClient(format!("failed to get signatures for {}: {}", address, e))
            })?;

        Ok(statuses
            .into_iter()
            .map(|status| SignatureRef {
                signature: status.signature,
                slot: status.slot,
                block_time: status.block_time,
                status: confirmation_status(status.confirmation_status),
            })
            .collect())
    }

    async fn get_parsed_transaction(&self, signature: &str) -> Result<Option<ParsedTransaction>> {
        let signature = Signature::from_str(signature)
            .map_err(|e| anyhow!("Invalid signature {}: {}", signature, e))?;

        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::JsonParsed),
            commitment: Some(self.client.commitment()),
            max_supported_transaction_version: Some(0),
        };

        let transaction = self
            .client
            .get_transaction_with_config(&signature, config)
            .await
            .map_err(|e| {
                WalletError::SolanaClient(format!("failed to get transaction {}: {}", signature, e))
            })?;

        Ok(parse_confirmed_transaction(transaction))
    }

    async fn get_latest_blockhash(&self) -> Result<Hash> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(|e| {
                WalletError::SolanaClient(format!("failed to get recent blockhash: {}", e)).into()
            })
    }

    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        self.client
            .send_and_confirm_transaction(transaction)
            .await
            .map_err(|e| {
                WalletError::SolanaClient(format!("failed to send transaction: {}", e)).into()
            })
    }
}
