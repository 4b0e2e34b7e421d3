use anyhow::Result;
use std::sync::Arc;
use teloxide::{dispatching::dialogue::InMemStorage, prelude::*};

use crate::di::ServiceContainer;
use crate::entity::State;
use teloxide::dispatching::dialogue::Dialogue;

pub mod balance;
pub mod callback;
pub mod help;
pub mod history;
pub mod menu;
pub mod request;
pub mod send;
pub mod start;
pub mod ui;
pub mod wallet;

pub type MyDialogue = Dialogue<State, InMemStorage<State>>;

/// Trait that defines a command handler
pub trait CommandHandler {
    /// The command name in lowercase
    fn command_name() -> &'static str;

    /// The command description for help
    fn description() -> &'static str;

    /// Execute the command
    async fn execute(
        bot: Bot,
        msg: Message,
        telegram_id: i64,
        dialogue: Option<MyDialogue>,
        services: Arc<ServiceContainer>,
    ) -> Result<()>;
}

/// Register all command handlers in the command system
pub fn register_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            start::StartCommand::command_name(),
            start::StartCommand::description(),
        ),
        (
            balance::BalanceCommand::command_name(),
            balance::BalanceCommand::description(),
        ),
        (
            send::SendCommand::command_name(),
            send::SendCommand::description(),
        ),
        (
            request::RequestCommand::command_name(),
            request::RequestCommand::description(),
        ),
        (
            request::RequestSolCommand::command_name(),
            request::RequestSolCommand::description(),
        ),
        (
            history::HistoryCommand::command_name(),
            history::HistoryCommand::description(),
        ),
        (
            wallet::AddressCommand::command_name(),
            wallet::AddressCommand::description(),
        ),
        (
            wallet::ConnectCommand::command_name(),
            wallet::ConnectCommand::description(),
        ),
        (
            wallet::DisconnectCommand::command_name(),
            wallet::DisconnectCommand::description(),
        ),
        (
            menu::MenuCommand::command_name(),
            menu::MenuCommand::description(),
        ),
        (
            help::HelpCommand::command_name(),
            help::HelpCommand::description(),
        ),
    ]
}

/// Bot Commands enum for teloxide command filter
#[derive(teloxide::utils::command::BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum BotCommands {
    #[command(description = "start the bot and show your balance")]
    Start,
    #[command(description = "show your SOL and USDC balance")]
    Balance,
    #[command(description = "send USDC or SOL to another address")]
    Send,
    #[command(description = "request a USDC payment with a QR code")]
    Request,
    #[command(rename = "request_sol", description = "request a SOL payment with a QR code")]
    RequestSol,
    #[command(description = "show recent USDC transfers")]
    History,
    #[command(description = "show your wallet address and QR code")]
    Address,
    #[command(description = "connect the wallet")]
    Connect,
    #[command(description = "disconnect the wallet")]
    Disconnect,
    #[command(description = "show the main menu")]
    Menu,
    #[command(description = "display this help message")]
    Help,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_is_registered() {
        let names: Vec<&str> = register_commands().iter().map(|(name, _)| *name).collect();

        for expected in [
            "start",
            "balance",
            "send",
            "request",
            "request_sol",
            "history",
            "address",
            "connect",
            "disconnect",
            "menu",
            "help",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }
}
