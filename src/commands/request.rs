use anyhow::{anyhow, Result};
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::{Asset, State};
use crate::interactor::request_interactor::RequestInteractorImpl;
use crate::presenter::request_presenter::{RequestPresenter, RequestPresenterImpl};
use crate::view::request_view::TelegramRequestView;

fn request_presenter(
    bot: &Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
) -> RequestPresenterImpl<RequestInteractorImpl, TelegramRequestView> {
    let interactor = Arc::new(RequestInteractorImpl::new(
        services.solana_client(),
        services.wallet(),
        services.usdc_mint(),
    ));
    let view = Arc::new(TelegramRequestView::new(bot.clone(), chat_id));
    RequestPresenterImpl::new(interactor, view)
}

pub struct RequestCommand;

impl CommandHandler for RequestCommand {
    fn command_name() -> &'static str {
        "request"
    }

    fn description() -> &'static str {
        "request a USDC payment with a QR code"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let dialogue = dialogue.ok_or_else(|| anyhow!("Dialogue context not provided"))?;
        info!("Request command received from Telegram ID: {}", telegram_id);

        start_request(&bot, msg.chat.id, Asset::Usdc, dialogue, services).await
    }
}

pub struct RequestSolCommand;

impl CommandHandler for RequestSolCommand {
    fn command_name() -> &'static str {
        "request_sol"
    }

    fn description() -> &'static str {
        "request a SOL payment with a QR code"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let dialogue = dialogue.ok_or_else(|| anyhow!("Dialogue context not provided"))?;
        info!(
            "Request SOL command received from Telegram ID: {}",
            telegram_id
        );

        start_request(&bot, msg.chat.id, Asset::Sol, dialogue, services).await
    }
}

pub async fn start_request(
    bot: &Bot,
    chat_id: ChatId,
    asset: Asset,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let presenter = request_presenter(bot, chat_id, &services);

    if presenter.start_request_flow(asset).await? {
        dialogue.update(State::AwaitingRequestAmount { asset }).await?;
    }

    Ok(())
}

pub async fn receive_request_amount(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let State::AwaitingRequestAmount { asset } = state else {
        return Ok(());
    };

    let text = msg.text().unwrap_or_default();
    let presenter = request_presenter(&bot, msg.chat.id, &services);

    if presenter.handle_amount(text, asset).await? {
        dialogue.update(State::Start).await?;
    }

    Ok(())
}
