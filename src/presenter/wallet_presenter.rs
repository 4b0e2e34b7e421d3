use crate::interactor::wallet_interactor::WalletInteractor;
use crate::view::wallet_view::WalletView;
use anyhow::Result;
use async_trait::async_trait;
use log::error;
use std::sync::Arc;

#[async_trait]
pub trait WalletPresenter: Send + Sync {
    async fn connect(&self) -> Result<()>;
    async fn disconnect(&self) -> Result<()>;
    async fn show_wallet_address(&self) -> Result<()>;
}

pub struct WalletPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> WalletPresenterImpl<I, V>
where
    I: WalletInteractor,
    V: WalletView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> WalletPresenter for WalletPresenterImpl<I, V>
where
    I: WalletInteractor + Send + Sync,
    V: WalletView + Send + Sync,
{
    async fn connect(&self) -> Result<()> {
        match self.interactor.connect().await {
            Ok(address) => self.view.display_connected(address).await,
            Err(e) => {
                error!("Failed to connect wallet: {}", e);
                self.view.display_error(e.to_string()).await
            }
        }
    }

    async fn disconnect(&self) -> Result<()> {
        match self.interactor.disconnect().await {
            Ok(()) => self.view.display_disconnected().await,
            Err(e) => self.view.display_error(e.to_string()).await,
        }
    }

    async fn show_wallet_address(&self) -> Result<()> {
        match self.interactor.get_wallet_address().await? {
            Some(address) => self.view.display_wallet_address(address).await,
            None => self.view.display_not_connected().await,
        }
    }
}
