use crate::entity::{Asset, WalletError};
use crate::interactor::request_interactor::RequestInteractor;
use crate::view::request_view::RequestView;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait RequestPresenter: Send + Sync {
    async fn start_request_flow(&self, asset: Asset) -> Result<bool>;
    /// True once the request was shown and the amount prompt is done.
    async fn handle_amount(&self, amount_text: &str, asset: Asset) -> Result<bool>;
}

pub struct RequestPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> RequestPresenterImpl<I, V>
where
    I: RequestInteractor,
    V: RequestView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> RequestPresenter for RequestPresenterImpl<I, V>
where
    I: RequestInteractor + Send + Sync,
    V: RequestView + Send + Sync,
{
    async fn start_request_flow(&self, asset: Asset) -> Result<bool> {
        if !self.interactor.is_wallet_connected() {
            self.view.display_not_connected().await?;
            return Ok(false);
        }

        self.view.prompt_for_amount(asset).await?;
        Ok(true)
    }

    async fn handle_amount(&self, amount_text: &str, asset: Asset) -> Result<bool> {
        match self
            .interactor
            .create_payment_request(amount_text, asset)
            .await
        {
            Ok(request) => {
                self.view.display_payment_request(request).await?;
                Ok(true)
            }
            Err(e) => match e.downcast_ref::<WalletError>() {
                Some(WalletError::InvalidAmount) => {
                    self.view.display_invalid_amount(e.to_string()).await?;
                    Ok(false)
                }
                Some(WalletError::WalletNotConnected) => {
                    self.view.display_not_connected().await?;
                    Ok(true)
                }
                _ => {
                    self.view.display_error(e.to_string()).await?;
                    Ok(true)
                }
            },
        }
    }
}
