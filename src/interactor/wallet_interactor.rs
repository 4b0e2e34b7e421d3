use crate::solana::WalletAdapter;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait WalletInteractor: Send + Sync {
    async fn connect(&self) -> Result<String>;
    async fn disconnect(&self) -> Result<()>;
    async fn get_wallet_address(&self) -> Result<Option<String>>;
}

pub struct WalletInteractorImpl {
    wallet: Arc<dyn WalletAdapter>,
}

impl WalletInteractorImpl {
    pub fn new(wallet: Arc<dyn WalletAdapter>) -> Self {
        Self { wallet }
    }
}

#[async_trait]
impl WalletInteractor for WalletInteractorImpl {
    async fn connect(&self) -> Result<String> {
        let address = self.wallet.connect().await?;
        Ok(address.to_string())
    }

    async fn disconnect(&self) -> Result<()> {
        self.wallet.disconnect().await
    }

    async fn get_wallet_address(&self) -> Result<Option<String>> {
        Ok(self.wallet.public_key().map(|key| key.to_string()))
    }
}
