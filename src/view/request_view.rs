use crate::entity::Asset;
use crate::interactor::request_interactor::{PaymentRequest, ReceivePreparation};
use anyhow::Result;
use async_trait::async_trait;
use teloxide::{prelude::*, types::InputFile, Bot};

#[async_trait]
pub trait RequestView: Send + Sync {
    async fn prompt_for_amount(&self, asset: Asset) -> Result<()>;
    async fn display_invalid_amount(&self, error_message: String) -> Result<()>;
    async fn display_payment_request(&self, request: PaymentRequest) -> Result<()>;
    async fn display_not_connected(&self) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub struct TelegramRequestView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramRequestView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

pub fn format_request_caption(request: &PaymentRequest) -> String {
    let mut caption = format!(
        "Payment request for {} {}\n\n{}",
        request.amount, request.asset, request.uri
    );

    match &request.preparation {
        ReceivePreparation::Ready => {}
        ReceivePreparation::AccountCreated(signature) => {
            caption.push_str(&format!(
                "\n\nCreated a {} token account to receive this payment ({}).",
                request.asset, signature
            ));
        }
        ReceivePreparation::Failed(error) => {
            caption.push_str(&format!(
                "\n\nWarning: the {} token account could not be created: {}",
                request.asset, error
            ));
        }
    }

    caption
}

#[async_trait]
impl RequestView for TelegramRequestView {
    async fn prompt_for_amount(&self, asset: Asset) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!("Enter the amount of {} to request:", asset),
            )
            .await?;
        Ok(())
    }

    async fn display_invalid_amount(&self, error_message: String) -> Result<()> {
        self.bot
            .send_message(self.chat_id, format!("{}. Try again:", error_message))
            .await?;
        Ok(())
    }

    async fn display_payment_request(&self, request: PaymentRequest) -> Result<()> {
        let caption = format_request_caption(&request);

        self.bot
            .send_photo(
                self.chat_id,
                InputFile::memory(request.qr_png).file_name("payment_request.png"),
            )
            .caption(caption)
            .await?;

        Ok(())
    }

    async fn display_not_connected(&self) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                "Wallet is not connected. Use /connect before requesting a payment.",
            )
            .await?;
        Ok(())
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.bot
            .send_message(self.chat_id, format!("Error: {}", error_message))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(preparation: ReceivePreparation) -> PaymentRequest {
        PaymentRequest {
            uri: "solana:Addr1?amount=5&token=Mint".to_string(),
            qr_png: Vec::new(),
            amount: "5".to_string(),
            asset: Asset::Usdc,
            preparation,
        }
    }

    #[test]
    fn caption_carries_uri() {
        let caption = format_request_caption(&request(ReceivePreparation::Ready));

        assert_eq!(
            caption,
            "Payment request for 5 USDC\n\nsolana:Addr1?amount=5&token=Mint"
        );
    }

    #[test]
    fn caption_reports_account_preparation() {
        let created = format_request_caption(&request(ReceivePreparation::AccountCreated(
            "Sig1".to_string(),
        )));
        assert!(created.contains("Created a USDC token account"));

        let failed =
            format_request_caption(&request(ReceivePreparation::Failed("timeout".to_string())));
        assert!(failed.ends_with("could not be created: timeout"));
    }
}
