use anyhow::Result;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::wallet_interactor::WalletInteractorImpl;
use crate::presenter::wallet_presenter::{WalletPresenter, WalletPresenterImpl};
use crate::view::wallet_view::TelegramWalletView;

fn wallet_presenter(
    bot: &Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
) -> WalletPresenterImpl<WalletInteractorImpl, TelegramWalletView> {
    let interactor = Arc::new(WalletInteractorImpl::new(services.wallet()));
    let view = Arc::new(TelegramWalletView::new(bot.clone(), chat_id));
    WalletPresenterImpl::new(interactor, view)
}

pub struct ConnectCommand;

impl CommandHandler for ConnectCommand {
    fn command_name() -> &'static str {
        "connect"
    }

    fn description() -> &'static str {
        "connect the wallet"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Connect command received from Telegram ID: {}", telegram_id);

        wallet_presenter(&bot, msg.chat.id, &services)
            .connect()
            .await?;
        services.clear_history_states().await;

        Ok(())
    }
}

pub struct DisconnectCommand;

impl CommandHandler for DisconnectCommand {
    fn command_name() -> &'static str {
        "disconnect"
    }

    fn description() -> &'static str {
        "disconnect the wallet"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!(
            "Disconnect command received from Telegram ID: {}",
            telegram_id
        );

        // A pending send cannot finish without a wallet
        if let Some(dialogue) = dialogue {
            dialogue.update(State::Start).await?;
        }

        wallet_presenter(&bot, msg.chat.id, &services)
            .disconnect()
            .await?;
        services.clear_history_states().await;

        Ok(())
    }
}

pub struct AddressCommand;

impl CommandHandler for AddressCommand {
    fn command_name() -> &'static str {
        "address"
    }

    fn description() -> &'static str {
        "show your wallet address and QR code"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        _dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        info!("Address command received from Telegram ID: {}", telegram_id);

        wallet_presenter(&bot, msg.chat.id, &services)
            .show_wallet_address()
            .await
    }
}
