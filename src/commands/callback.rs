use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use teloxide::prelude::*;

use crate::commands::{balance, help, history, menu, request, send, wallet, CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::Asset;

// Main callback handler function
pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let callback_data = match q.data.clone() {
        Some(data) => data,
        None => return Ok(()),
    };

    // Buttons only live under our own messages
    let message = match q.regular_message() {
        Some(msg) => msg.clone(),
        None => return Ok(()),
    };
    let chat_id = message.chat.id;

    let telegram_id = q.from.id.0 as i64;

    info!(
        "Received callback: {} from user {}",
        callback_data, telegram_id
    );

    // Acknowledge the callback query to stop loading animation
    if let Err(err) = bot.answer_callback_query(q.id.clone()).await {
        warn!("Failed to answer callback query: {}", err);
    }

    match callback_data.as_str() {
        "refresh" => balance::show_balances(&bot, chat_id, services).await?,
        "menu" => {
            menu::MenuCommand::execute(bot, message, telegram_id, Some(dialogue), services).await?
        }
        "send" => {
            send::SendCommand::execute(bot, message, telegram_id, Some(dialogue), services).await?
        }
        "confirm_send" => {
            send::handle_confirmation_button(&bot, chat_id, true, dialogue, services).await?
        }
        "cancel_send" => {
            send::handle_confirmation_button(&bot, chat_id, false, dialogue, services).await?
        }
        "request_usdc" => {
            request::start_request(&bot, chat_id, Asset::Usdc, dialogue, services).await?
        }
        "request_sol" => {
            request::start_request(&bot, chat_id, Asset::Sol, dialogue, services).await?
        }
        "history" => history::show_history(&bot, chat_id, false, services).await?,
        "refresh_history" => history::show_history(&bot, chat_id, true, services).await?,
        "address" => {
            wallet::AddressCommand::execute(bot, message, telegram_id, Some(dialogue), services)
                .await?
        }
        "connect" => {
            wallet::ConnectCommand::execute(bot, message, telegram_id, Some(dialogue), services)
                .await?
        }
        "disconnect" => {
            wallet::DisconnectCommand::execute(bot, message, telegram_id, Some(dialogue), services)
                .await?
        }
        "help" => {
            help::HelpCommand::execute(bot, message, telegram_id, Some(dialogue), services).await?
        }
        other => {
            warn!("Unknown callback data: {}", other);
        }
    }

    Ok(())
}
