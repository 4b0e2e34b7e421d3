use crate::commands::ui;
use crate::entity::Asset;
use crate::interactor::send_interactor::TransactionResult;
use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
    Bot,
};

#[async_trait]
pub trait SendView: Send + Sync {
    async fn prompt_for_recipient_address(&self) -> Result<()>;
    async fn display_invalid_address(&self, error_message: String) -> Result<()>;
    async fn prompt_for_amount(&self, recipient: &str) -> Result<()>;
    async fn display_invalid_amount(&self, error_message: String) -> Result<()>;
    async fn prompt_for_confirmation(&self, recipient: &str, amount: &str, asset: Asset)
        -> Result<()>;
    async fn display_processing(&self) -> Result<Option<Message>>;
    async fn display_transaction_success(
        &self,
        result: TransactionResult,
        message: Option<Message>,
    ) -> Result<()>;
    async fn display_transaction_error(
        &self,
        recipient: &str,
        amount: &str,
        asset: Asset,
        error_message: String,
        message: Option<Message>,
    ) -> Result<()>;
    async fn display_transaction_cancelled(&self) -> Result<()>;
    async fn display_not_connected(&self) -> Result<()>;
}

pub struct TelegramSendView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramSendView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    async fn send_or_edit(&self, text: String, message: Option<Message>) -> Result<()> {
        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .await?;
        } else {
            self.bot.send_message(self.chat_id, text).await?;
        }

        Ok(())
    }
}

pub fn format_success_text(result: &TransactionResult) -> String {
    format!(
        "✅ Transaction confirmed.\nAmount: {} {}\nTo: {}\nSignature: {}\nView on explorer: {}",
        result.amount, result.asset, result.recipient, result.signature, result.explorer_url
    )
}

pub fn format_confirmation_text(recipient: &str, amount: &str, asset: Asset) -> String {
    format!(
        "Send {} {} to {}?\n\nReply yes or no, or use the buttons below.",
        amount, asset, recipient
    )
}

#[async_trait]
impl SendView for TelegramSendView {
    async fn prompt_for_recipient_address(&self) -> Result<()> {
        self.bot
            .send_message(self.chat_id, "Enter the recipient's Solana address:")
            .await?;
        Ok(())
    }

    async fn display_invalid_address(&self, error_message: String) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!("{}. Please check the address and try again:", error_message),
            )
            .await?;
        Ok(())
    }

    async fn prompt_for_amount(&self, recipient: &str) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!(
                    "Recipient: {}\nEnter the amount to send (example: 2.5 for USDC or 0.1 SOL):",
                    recipient
                ),
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

    async fn prompt_for_confirmation(
        &self,
        recipient: &str,
        amount: &str,
        asset: Asset,
    ) -> Result<()> {
        let keyboard = InlineKeyboardMarkup::new(vec![vec![
            InlineKeyboardButton::callback("✅ Confirm", "confirm_send"),
            InlineKeyboardButton::callback("❌ Cancel", "cancel_send"),
        ]]);

        self.bot
            .send_message(
                self.chat_id,
                format_confirmation_text(recipient, amount, asset),
            )
            .reply_markup(keyboard)
            .await?;
        Ok(())
    }

    async fn display_processing(&self) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(
                self.chat_id,
                "Sending... Waiting for the network to confirm.",
            )
            .await?;

        Ok(Some(message))
    }

    async fn display_transaction_success(
        &self,
        result: TransactionResult,
        message: Option<Message>,
    ) -> Result<()> {
        self.send_or_edit(format_success_text(&result), message)
            .await?;

        self.bot
            .send_message(self.chat_id, "What would you like to do next?")
            .reply_markup(ui::create_wallet_menu_keyboard(true))
            .await?;

        Ok(())
    }

    async fn display_transaction_error(
        &self,
        recipient: &str,
        amount: &str,
        asset: Asset,
        error_message: String,
        message: Option<Message>,
    ) -> Result<()> {
        let text = format!(
            "❌ Could not send {} {} to {}:\n{}",
            amount, asset, recipient, error_message
        );

        self.send_or_edit(text, message).await
    }

    async fn display_transaction_cancelled(&self) -> Result<()> {
        self.bot
            .send_message(self.chat_id, "Transaction cancelled.")
            .reply_markup(ui::create_wallet_menu_keyboard(true))
            .await?;

        Ok(())
    }

    async fn display_not_connected(&self) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                "Wallet is not connected. Use /connect before sending.",
            )
            .reply_markup(ui::create_wallet_menu_keyboard(false))
            .await?;
        Ok(())
    }
}
