use crate::entity::WalletError;
use crate::interactor::balance_interactor::BalanceInteractor;
use crate::view::balance_view::BalanceView;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait BalancePresenter: Send + Sync {
    async fn show_balances(&self) -> Result<()>;
}

pub struct BalancePresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> BalancePresenterImpl<I, V>
where
    I: BalanceInteractor,
    V: BalanceView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> BalancePresenter for BalancePresenterImpl<I, V>
where
    I: BalanceInteractor + Send + Sync,
    V: BalanceView + Send + Sync,
{
    async fn show_balances(&self) -> Result<()> {
        let message = self.view.display_loading().await?;

        match self.interactor.get_wallet_balances().await {
            Ok(balances) => {
                self.view.display_balances(balances, message).await?;
            }
            Err(e) => match e.downcast_ref::<WalletError>() {
                Some(WalletError::WalletNotConnected) => {
                    self.view.display_not_connected(message).await?;
                }
                Some(WalletError::MintUnavailable(_)) => {
                    self.view
                        .display_balance_unknown(e.to_string(), message)
                        .await?;
                }
                _ => {
                    self.view.display_error(e.to_string(), message).await?;
                }
            },
        }

        Ok(())
    }
}
