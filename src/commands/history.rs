use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::interactor::history_interactor::HistoryInteractorImpl;
use crate::presenter::history_presenter::{HistoryPresenter, HistoryPresenterImpl};
use crate::view::history_view::TelegramHistoryView;

pub struct HistoryCommand;

impl CommandHandler for HistoryCommand {
    fn command_name() -> &'static str {
        "history"
    }

    fn description() -> &'static str {
        "show recent USDC transfers"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("History command received from Telegram ID: {}", telegram_id);

        show_history(&bot, msg.chat.id, false, services).await
    }
}

/// Loads the history screen of a chat. With `refresh` the list already on
/// screen is kept if the new fetch fails.
pub async fn show_history(
    bot: &Bot,
    chat_id: ChatId,
    refresh: bool,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let previous = if refresh {
        services.history_state(chat_id.0).await
    } else {
        None
    };

    let interactor = Arc::new(HistoryInteractorImpl::new(
        services.solana_client(),
        services.wallet(),
        services.usdc_mint(),
        services.config().history_limit,
    ));
    let view = Arc::new(TelegramHistoryView::new(
        bot.clone(),
        chat_id,
        services.config().explorer_cluster.clone(),
    ));
    let presenter = HistoryPresenterImpl::new(interactor, view);

    let state = presenter.show_history(previous).await?;
    services.set_history_state(chat_id.0, state).await;

    Ok(())
}
