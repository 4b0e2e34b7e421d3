use crate::commands::ui;
use crate::entity::{Asset, TokenAccountState};
use crate::interactor::balance_interactor::WalletBalances;
use crate::utils;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use teloxide::{
    prelude::*,
    types::{Message, ParseMode},
    Bot,
};

#[async_trait]
pub trait BalanceView: Send + Sync {
    async fn display_loading(&self) -> Result<Option<Message>>;
    async fn display_balances(
        &self,
        balances: WalletBalances,
        message: Option<Message>,
    ) -> Result<()>;
    async fn display_balance_unknown(
        &self,
        error_message: String,
        message: Option<Message>,
    ) -> Result<()>;
    async fn display_not_connected(&self, message: Option<Message>) -> Result<()>;
    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()>;
}

pub struct TelegramBalanceView {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramBalanceView {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    // Edit the loading message when there is one
    async fn show(
        &self,
        text: String,
        connected: bool,
        message: Option<Message>,
    ) -> Result<()> {
        let keyboard = ui::create_wallet_menu_keyboard(connected);

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        } else {
            self.bot
                .send_message(self.chat_id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboard)
                .await?;
        }

        Ok(())
    }
}

pub fn format_balances_text(balances: &WalletBalances, updated_at: DateTime<Utc>) -> String {
    let usdc_line = match &balances.usdc.account {
        TokenAccountState::Missing => format!(
            "Balance: <b>{}</b> {} (no token account yet)",
            utils::format_amount(balances.usdc.amount, Asset::Usdc),
            Asset::Usdc
        ),
        TokenAccountState::Existing | TokenAccountState::Created(_) => format!(
            "Balance: <b>{}</b> {}",
            utils::format_amount(balances.usdc.amount, Asset::Usdc),
            Asset::Usdc
        ),
    };

    format!(
        "<b>Wallet</b>\n\
        <code>{}</code>\n\n\
        {}\n\
        SOL: {}\n\n\
        Updated: {} UTC",
        balances.address,
        usdc_line,
        utils::format_amount(balances.sol_balance, Asset::Sol),
        updated_at.format("%H:%M:%S")
    )
}

#[async_trait]
impl BalanceView for TelegramBalanceView {
    async fn display_loading(&self) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(self.chat_id, "Fetching balance...")
            .await?;

        Ok(Some(message))
    }

    async fn display_balances(
        &self,
        balances: WalletBalances,
        message: Option<Message>,
    ) -> Result<()> {
        let text = format_balances_text(&balances, Utc::now());
        self.show(text, true, message).await
    }

    async fn display_balance_unknown(
        &self,
        error_message: String,
        message: Option<Message>,
    ) -> Result<()> {
        let text = format!(
            "Balance: <b>unknown</b>\n\n{}",
            utils::escape_html(&error_message)
        );
        self.show(text, true, message).await
    }

    async fn display_not_connected(&self, message: Option<Message>) -> Result<()> {
        let text = "Wallet is not connected. Use /connect to connect it.".to_string();
        self.show(text, false, message).await
    }

    async fn display_error(&self, error_message: String, message: Option<Message>) -> Result<()> {
        let text = format!("Error: {}", utils::escape_html(&error_message));
        self.show(text, true, message).await
    }
}
