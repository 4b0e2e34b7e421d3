use crate::entity::{Asset, WalletError};
use crate::solana::{self, ChainRpc, WalletAdapter};
use crate::utils;
use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct TransactionResult {
    pub recipient: String,
    pub amount: String,
    pub asset: Asset,
    pub signature: String,
    pub explorer_url: String,
}

#[async_trait]
pub trait SendInteractor: Send + Sync {
    fn is_wallet_connected(&self) -> bool;
    async fn validate_address(&self, address: &str) -> Result<bool>;
    async fn parse_amount_and_asset(&self, amount_text: &str) -> Result<(String, Asset)>;
    /// Validates, submits and waits for confirmation. One attempt, no retry.
    async fn send_transaction(
        &self,
        recipient: &str,
        amount: &str,
        asset: Asset,
    ) -> Result<TransactionResult>;
}

pub struct SendInteractorImpl {
    solana_client: Arc<dyn ChainRpc>,
    wallet: Arc<dyn WalletAdapter>,
    usdc_mint: Pubkey,
    explorer_cluster: String,
}

impl SendInteractorImpl {
    pub fn new(
        solana_client: Arc<dyn ChainRpc>,
        wallet: Arc<dyn WalletAdapter>,
        usdc_mint: Pubkey,
        explorer_cluster: String,
    ) -> Self {
        Self {
            solana_client,
            wallet,
            usdc_mint,
            explorer_cluster,
        }
    }
}

#[async_trait]
impl SendInteractor for SendInteractorImpl {
    fn is_wallet_connected(&self) -> bool {
        self.wallet.public_key().is_some()
    }

    async fn validate_address(&self, address: &str) -> Result<bool> {
        Ok(utils::validate_solana_address(address))
    }

    async fn parse_amount_and_asset(&self, amount_text: &str) -> Result<(String, Asset)> {
        Ok(utils::parse_amount_and_asset(amount_text)?)
    }

    async fn send_transaction(
        &self,
        recipient: &str,
        amount: &str,
        asset: Asset,
    ) -> Result<TransactionResult> {
        // Nothing touches the network until the input is valid
        let (recipient_pubkey, amount_value) = utils::validate_transfer(recipient, amount)?;

        let sender = self
            .wallet
            .public_key()
            .ok_or(WalletError::WalletNotConnected)?;

        info!(
            "Sending {} {} from {} to {}",
            amount_value, asset, sender, recipient_pubkey
        );

        let client = self.solana_client.as_ref();
        let wallet = self.wallet.as_ref();

        let result = match asset {
            Asset::Sol => {
                solana::send_sol(client, wallet, &sender, &recipient_pubkey, amount_value).await
            }
            Asset::Usdc => {
                solana::send_spl_token(
                    client,
                    wallet,
                    &sender,
                    &recipient_pubkey,
                    &self.usdc_mint,
                    amount_value,
                )
                .await
            }
        };

        match result {
            Ok(signature) => {
                let signature = signature.to_string();
                info!("Transaction confirmed: {}", signature);
                Ok(TransactionResult {
                    recipient: recipient_pubkey.to_string(),
                    amount: amount.trim().to_string(),
                    asset,
                    explorer_url: utils::explorer_tx_url(&signature, &self.explorer_cluster),
                    signature,
                })
            }
            Err(e) => {
                error!("Failed to send transaction: {}", e);
                Err(WalletError::TransactionFailed(e.to_string()).into())
            }
        }
    }
}
