use anyhow::{anyhow, Result};
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

use super::{CommandHandler, MyDialogue};
use crate::di::ServiceContainer;
use crate::entity::State;
use crate::interactor::send_interactor::SendInteractorImpl;
use crate::presenter::send_presenter::{SendPresenter, SendPresenterImpl};
use crate::view::send_view::TelegramSendView;

fn send_presenter(
    bot: &Bot,
    chat_id: ChatId,
    services: &ServiceContainer,
) -> SendPresenterImpl<SendInteractorImpl, TelegramSendView> {
    let interactor = Arc::new(SendInteractorImpl::new(
        services.solana_client(),
        services.wallet(),
        services.usdc_mint(),
        services.config().explorer_cluster.clone(),
    ));
    let view = Arc::new(TelegramSendView::new(bot.clone(), chat_id));
    SendPresenterImpl::new(interactor, view)
}

pub struct SendCommand;

impl CommandHandler for SendCommand {
    fn command_name() -> &'static str {
        "send"
    }

    fn description() -> &'static str {
        "send USDC or SOL to another address"
    }

    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()> {
        let dialogue = dialogue.ok_or_else(|| anyhow!("Dialogue context not provided"))?;
        info!("Send command initiated by Telegram ID: {}", telegram_id);

        let presenter = send_presenter(&bot, msg.chat.id, &services);
        if presenter.start_send_flow().await? {
            dialogue.update(State::AwaitingRecipientAddress).await?;
        }

        Ok(())
    }
}

pub async fn receive_recipient_address(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let text = msg.text().unwrap_or_default();
    let presenter = send_presenter(&bot, msg.chat.id, &services);

    if let Some(recipient) = presenter.handle_recipient_address(text).await? {
        dialogue.update(State::AwaitingAmount { recipient }).await?;
    }

    Ok(())
}

pub async fn receive_amount(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let State::AwaitingAmount { recipient } = state else {
        return Ok(());
    };

    let text = msg.text().unwrap_or_default();
    let presenter = send_presenter(&bot, msg.chat.id, &services);

    if let Some((amount, asset)) = presenter.handle_amount(text, &recipient).await? {
        dialogue
            .update(State::AwaitingConfirmation {
                recipient,
                amount,
                asset,
            })
            .await?;
    }

    Ok(())
}

pub async fn receive_confirmation(
    bot: Bot,
    msg: Message,
    state: State,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let State::AwaitingConfirmation {
        recipient,
        amount,
        asset,
    } = state
    else {
        return Ok(());
    };

    // Leave the form before the confirmation wait so a second reply cannot resend
    dialogue.update(State::Start).await?;

    let text = msg.text().unwrap_or_default();
    send_presenter(&bot, msg.chat.id, &services)
        .handle_confirmation(text, &recipient, &amount, asset)
        .await
}

/// Confirm/Cancel buttons under the confirmation prompt.
pub async fn handle_confirmation_button(
    bot: &Bot,
    chat_id: ChatId,
    confirmed: bool,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let state = dialogue.get().await?.unwrap_or_default();
    let State::AwaitingConfirmation {
        recipient,
        amount,
        asset,
    } = state
    else {
        bot.send_message(chat_id, "There is no pending transfer to confirm.")
            .await?;
        return Ok(());
    };

    dialogue.update(State::Start).await?;

    let presenter = send_presenter(bot, chat_id, &services);
    if confirmed {
        presenter.confirm(&recipient, &amount, asset).await
    } else {
        presenter.cancel().await
    }
}
