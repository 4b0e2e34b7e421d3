use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::interactor::balance_interactor::BalanceInteractorImpl;
use crate::presenter::balance_presenter::{BalancePresenter, BalancePresenterImpl};
use crate::view::balance_view::TelegramBalanceView;

pub struct BalanceCommand;

impl CommandHandler for BalanceCommand {
    fn command_name() -> &'static str {
        "balance"
    }

    fn description() -> &'static str {
        "show your SOL and USDC balance"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Balance command received from Telegram ID: {}", telegram_id);

        show_balances(&bot, msg.chat.id, services).await
    }
}

pub async fn show_balances(
    bot: &Bot,
    chat_id: ChatId,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let interactor = Arc::new(BalanceInteractorImpl::new(
        services.solana_client(),
        services.wallet(),
        services.usdc_mint(),
    ));
    let view = Arc::new(TelegramBalanceView::new(bot.clone(), chat_id));
    let presenter = BalancePresenterImpl::new(interactor, view);

    presenter.show_balances().await
}
