use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::{prelude::*, types::ParseMode};

use super::{balance, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;

pub struct StartCommand;

impl CommandHandler for StartCommand {
    fn command_name() -> &'static str {
        "start"
    }

    fn description() -> &'static str {
        "start the bot"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let chat_id = msg.chat.id;

        info!("Start command received from Telegram ID: {}", telegram_id);

        // Drop any half-finished form
        if let Some(dialogue) = dialogue {
            dialogue.update(State::Start).await?;
        }

        bot.send_message(
            chat_id,
            "<b>Welcome!</b> I'm your Solana USDC wallet. Send and request USDC or SOL, and check your transfers.",
        )
        .parse_mode(ParseMode::Html)
        .await?;

        balance::show_balances(&bot, chat_id, services).await
    }
}
