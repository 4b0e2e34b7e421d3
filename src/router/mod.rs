use anyhow::Result;
use async_trait::async_trait;
use log::warn;
use std::sync::Arc;
use teloxide::{
    dispatching::dialogue::InMemStorage, dispatching::UpdateHandler, prelude::*,
};

use crate::commands::{
    self, balance, callback::handle_callback, help, history, menu, request, send, start, wallet,
    BotCommands, CommandHandler, MyDialogue,
};
use crate::di::ServiceContainer;
use crate::entity::State;

// Base router trait
#[async_trait]
pub trait Router: Send + Sync {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error>;
}

// Command router implementation
pub struct TelegramRouter {
    services: Arc<ServiceContainer>,
}

impl TelegramRouter {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }
}

fn sender_id(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |user| user.id.0 as i64)
}

async fn run_command<C: CommandHandler>(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    services: Arc<ServiceContainer>,
) -> Result<()> {
    let telegram_id = sender_id(&msg);
    C::execute(bot, msg, telegram_id, Some(dialogue), services).await
}

async fn reject_message(bot: Bot, msg: Message) -> Result<()> {
    warn!("Rejected message from Telegram ID: {}", sender_id(&msg));
    bot.send_message(msg.chat.id, "This wallet is private.")
        .await?;
    Ok(())
}

async fn reject_callback(bot: Bot, q: CallbackQuery) -> Result<()> {
    warn!("Rejected callback from Telegram ID: {}", q.from.id.0);
    bot.answer_callback_query(q.id)
        .text("This wallet is private.")
        .await?;
    Ok(())
}

#[async_trait]
impl Router for TelegramRouter {
    fn setup_handlers(&self) -> UpdateHandler<anyhow::Error> {
        use dptree::case;

        let services = self.services.clone();

        // Each endpoint gets its own handle on the container
        macro_rules! command {
            ($handler:ty) => {{
                let services = services.clone();
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services.clone();
                    async move { run_command::<$handler>(bot, msg, dialogue, services).await }
                }
            }};
        }

        macro_rules! dialogue_step {
            ($step:path) => {{
                let services = services.clone();
                move |bot: Bot, msg: Message, state: State, dialogue: MyDialogue| {
                    let services = services.clone();
                    async move { $step(bot, msg, state, dialogue, services).await }
                }
            }};
        }

        let command_handler = teloxide::filter_command::<BotCommands, _>()
            .branch(case![BotCommands::Start].endpoint(command!(start::StartCommand)))
            .branch(case![BotCommands::Balance].endpoint(command!(balance::BalanceCommand)))
            .branch(case![BotCommands::Send].endpoint(command!(send::SendCommand)))
            .branch(case![BotCommands::Request].endpoint(command!(request::RequestCommand)))
            .branch(case![BotCommands::RequestSol].endpoint(command!(request::RequestSolCommand)))
            .branch(case![BotCommands::History].endpoint(command!(history::HistoryCommand)))
            .branch(case![BotCommands::Address].endpoint(command!(wallet::AddressCommand)))
            .branch(case![BotCommands::Connect].endpoint(command!(wallet::ConnectCommand)))
            .branch(case![BotCommands::Disconnect].endpoint(command!(wallet::DisconnectCommand)))
            .branch(case![BotCommands::Menu].endpoint(command!(menu::MenuCommand)))
            .branch(case![BotCommands::Help].endpoint(command!(help::HelpCommand)));

        let services_for_recipient = services.clone();
        let dialogue_handler = dptree::entry()
            .branch(case![State::AwaitingRecipientAddress].endpoint(
                move |bot: Bot, msg: Message, dialogue: MyDialogue| {
                    let services = services_for_recipient.clone();
                    async move {
                        commands::send::receive_recipient_address(bot, msg, dialogue, services)
                            .await
                    }
                },
            ))
            .branch(
                case![State::AwaitingAmount { recipient }]
                    .endpoint(dialogue_step!(commands::send::receive_amount)),
            )
            .branch(
                case![State::AwaitingConfirmation {
                    recipient,
                    amount,
                    asset
                }]
                .endpoint(dialogue_step!(commands::send::receive_confirmation)),
            )
            .branch(
                case![State::AwaitingRequestAmount { asset }]
                    .endpoint(dialogue_step!(commands::request::receive_request_amount)),
            );

        let services_for_auth = services.clone();
        let message_handler = Update::filter_message()
            .branch(
                dptree::filter(move |msg: Message| {
                    !services_for_auth.is_authorized(sender_id(&msg))
                })
                .endpoint(reject_message),
            )
            .branch(command_handler)
            .branch(dialogue_handler);

        let services_for_callback_auth = services.clone();
        let services_for_callbacks = services.clone();
        let callback_handler = Update::filter_callback_query()
            .branch(
                dptree::filter(move |q: CallbackQuery| {
                    !services_for_callback_auth.is_authorized(q.from.id.0 as i64)
                })
                .endpoint(reject_callback),
            )
            .branch(dptree::endpoint(
                move |bot: Bot, q: CallbackQuery, dialogue: MyDialogue| {
                    let services = services_for_callbacks.clone();
                    async move { handle_callback(bot, q, dialogue, services).await }
                },
            ));

        teloxide::dispatching::dialogue::enter::<Update, InMemStorage<State>, State, _>()
            .branch(message_handler)
            .branch(callback_handler)
    }
}
