use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{ui, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;

pub struct MenuCommand;

impl CommandHandler for MenuCommand {
    fn command_name() -> &'static str {
        "menu"
    }

    fn description() -> &'static str {
        "show the main menu"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Menu command received from Telegram ID: {}", telegram_id);

        if let Some(dialogue) = dialogue {
            dialogue.update(State::Start).await?;
        }

        let connected = services.wallet().public_key().is_some();
        let text = if connected {
            "What would you like to do?"
        } else {
            "Wallet is not connected."
        };

        bot.send_message(msg.chat.id, text)
            .reply_markup(ui::create_wallet_menu_keyboard(connected))
            .await?;

        Ok(())
    }
}
