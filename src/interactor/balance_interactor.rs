use crate::entity::{Asset, TokenBalance, WalletError};
use crate::solana::{self, ChainRpc, WalletAdapter};
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct WalletBalances {
    pub address: String,
    pub sol_balance: Decimal,
    pub usdc: TokenBalance,
}

#[async_trait]
pub trait BalanceInteractor: Send + Sync {
    async fn get_wallet_balances(&self) -> Result<WalletBalances>;
}

pub struct BalanceInteractorImpl {
    solana_client: Arc<dyn ChainRpc>,
    wallet: Arc<dyn WalletAdapter>,
    usdc_mint: Pubkey,
}

impl BalanceInteractorImpl {
    pub fn new(
        solana_client: Arc<dyn ChainRpc>,
        wallet: Arc<dyn WalletAdapter>,
        usdc_mint: Pubkey,
    ) -> Self {
        Self {
            solana_client,
            wallet,
            usdc_mint,
        }
    }
}

#[async_trait]
impl BalanceInteractor for BalanceInteractorImpl {
    async fn get_wallet_balances(&self) -> Result<WalletBalances> {
        let owner = self
            .wallet
            .public_key()
            .ok_or(WalletError::WalletNotConnected)?;

        // Token balance first: a mint failure leaves the whole screen unknown
        let usdc = solana::get_token_balance(
            self.solana_client.as_ref(),
            &owner,
            &self.usdc_mint,
            Asset::Usdc.symbol(),
        )
        .await?;

        let sol_balance = solana::get_sol_balance(self.solana_client.as_ref(), &owner).await?;

        Ok(WalletBalances {
            address: owner.to_string(),
            sol_balance,
            usdc,
        })
    }
}
