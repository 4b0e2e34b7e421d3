use crate::entity::{Asset, WalletError};
use crate::interactor::send_interactor::SendInteractor;
use crate::view::send_view::SendView;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait SendPresenter: Send + Sync {
    /// False when no wallet is connected and the flow cannot start.
    async fn start_send_flow(&self) -> Result<bool>;
    /// The trimmed recipient when it is a usable address.
    async fn handle_recipient_address(&self, address_text: &str) -> Result<Option<String>>;
    async fn handle_amount(&self, amount_text: &str, recipient: &str)
        -> Result<Option<(String, Asset)>>;
    async fn handle_confirmation(
        &self,
        confirmation_text: &str,
        recipient: &str,
        amount: &str,
        asset: Asset,
    ) -> Result<()>;
    async fn confirm(&self, recipient: &str, amount: &str, asset: Asset) -> Result<()>;
    async fn cancel(&self) -> Result<()>;
}

pub struct SendPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> SendPresenterImpl<I, V>
where
    I: SendInteractor,
    V: SendView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> SendPresenter for SendPresenterImpl<I, V>
where
    I: SendInteractor + Send + Sync,
    V: SendView + Send + Sync,
{
    async fn start_send_flow(&self) -> Result<bool> {
        if !self.interactor.is_wallet_connected() {
            self.view.display_not_connected().await?;
            return Ok(false);
        }

        self.view.prompt_for_recipient_address().await?;
        Ok(true)
    }

    async fn handle_recipient_address(&self, address_text: &str) -> Result<Option<String>> {
        let address = address_text.trim();

        if address.is_empty() {
            self.view
                .display_invalid_address(WalletError::EmptyRecipient.to_string())
                .await?;
            return Ok(None);
        }

        if !self.interactor.validate_address(address).await? {
            self.view
                .display_invalid_address(WalletError::InvalidRecipient.to_string())
                .await?;
            return Ok(None);
        }

        self.view.prompt_for_amount(address).await?;
        Ok(Some(address.to_string()))
    }

    async fn handle_amount(
        &self,
        amount_text: &str,
        recipient: &str,
    ) -> Result<Option<(String, Asset)>> {
        match self.interactor.parse_amount_and_asset(amount_text).await {
            Ok((amount, asset)) => {
                self.view
                    .prompt_for_confirmation(recipient, &amount, asset)
                    .await?;
                Ok(Some((amount, asset)))
            }
            Err(e) => {
                self.view.display_invalid_amount(e.to_string()).await?;
                Ok(None)
            }
        }
    }

    async fn handle_confirmation(
        &self,
        confirmation_text: &str,
        recipient: &str,
        amount: &str,
        asset: Asset,
    ) -> Result<()> {
        let confirmation = confirmation_text.trim().to_lowercase();

        if confirmation == "yes" || confirmation == "y" {
            self.confirm(recipient, amount, asset).await
        } else {
            self.cancel().await
        }
    }

    async fn confirm(&self, recipient: &str, amount: &str, asset: Asset) -> Result<()> {
        let message = self.view.display_processing().await?;

        match self
            .interactor
            .send_transaction(recipient, amount, asset)
            .await
        {
            Ok(result) => {
                self.view
                    .display_transaction_success(result, message)
                    .await?;
            }
            Err(e) => match e.downcast_ref::<WalletError>() {
                Some(WalletError::WalletNotConnected) => {
                    self.view.display_not_connected().await?;
                }
                _ => {
                    self.view
                        .display_transaction_error(recipient, amount, asset, e.to_string(), message)
                        .await?;
                }
            },
        }

        Ok(())
    }

    async fn cancel(&self) -> Result<()> {
        self.view.display_transaction_cancelled().await
    }
}
