use crate::commands::ui;
use crate::qrcodeutils;
use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InputFile, ParseMode},
    Bot,
};

#[async_trait]
pub trait WalletView: Send + Sync {
    async fn display_connected(&self, address: String) -> Result<()>;
    async fn display_disconnected(&self) -> Result<()>;
    async fn display_wallet_address(&self, address: String) -> Result<()>;
    async fn display_not_connected(&self) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub struct TelegramWalletView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramWalletView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl WalletView for TelegramWalletView {
    async fn display_connected(&self, address: String) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!("Wallet connected:\n<code>{}</code>", address),
            )
            .parse_mode(ParseMode::Html)
            .reply_markup(ui::create_wallet_menu_keyboard(true))
            .await?;

        Ok(())
    }

    async fn display_disconnected(&self) -> Result<()> {
        self.bot
            .send_message(self.chat_id, "Wallet disconnected.")
            .reply_markup(ui::create_wallet_menu_keyboard(false))
            .await?;

        Ok(())
    }

    async fn display_wallet_address(&self, address: String) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                format!("Your wallet address:\n\n<code>{}</code>", address),
            )
            .parse_mode(ParseMode::Html)
            .await?;

        // Plain address QR, no amount
        let png_data = qrcodeutils::render_qr_png(&address)?;

        self.bot
            .send_photo(
                self.chat_id,
                InputFile::memory(png_data).file_name("address.png"),
            )
            .caption("QR code for your address")
            .await?;

        Ok(())
    }

    async fn display_not_connected(&self) -> Result<()> {
        self.bot
            .send_message(
                self.chat_id,
                "Wallet is not connected. Use /connect to connect it.",
            )
            .reply_markup(ui::create_wallet_menu_keyboard(false))
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
