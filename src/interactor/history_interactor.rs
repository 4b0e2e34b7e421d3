use crate::entity::{TransferRecord, WalletError};
use crate::solana::{self, ChainRpc, WalletAdapter};
use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

#[async_trait]
pub trait HistoryInteractor: Send + Sync {
    /// USDC transfers of the connected wallet, most recent first.
    async fn get_transfer_history(&self) -> Result<Vec<TransferRecord>>;
}

pub struct HistoryInteractorImpl {
    solana_client: Arc<dyn ChainRpc>,
    wallet: Arc<dyn WalletAdapter>,
    usdc_mint: Pubkey,
    limit: usize,
}

impl HistoryInteractorImpl {
    pub fn new(
        solana_client: Arc<dyn ChainRpc>,
        wallet: Arc<dyn WalletAdapter>,
        usdc_mint: Pubkey,
        limit: usize,
    ) -> Self {
        Self {
            solana_client,
            wallet,
            usdc_mint,
            limit,
        }
    }
}

#[async_trait]
impl HistoryInteractor for HistoryInteractorImpl {
    async fn get_transfer_history(&self) -> Result<Vec<TransferRecord>> {
        let owner = self
            .wallet
            .public_key()
            .ok_or(WalletError::WalletNotConnected)?;

        let reconciliation = solana::fetch_history(
            self.solana_client.as_ref(),
            &owner,
            &self.usdc_mint,
            self.limit,
        )
        .await?;

        Ok(reconciliation.records)
    }
}
