use std::sync::Arc;
use teloxide::{dispatching::dialogue::InMemStorage, Bot};

pub mod commands;
pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod qrcodeutils;
pub mod router;
pub mod solana;
pub mod utils;
pub mod view;

// Re-export commonly used items
pub use crate::config::AppConfig;
pub use commands::{BotCommands, MyDialogue};
pub use di::ServiceContainer;
pub use entity::*;
pub use router::{Router, TelegramRouter};
pub use solana::{create_solana_client, ChainRpc, KeypairWallet, RpcChain, WalletAdapter};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wires the router and dialogue storage around an already started container.
pub fn create_application(
    bot: Bot,
    services: Arc<ServiceContainer>,
) -> (
    TelegramRouter,
    Bot,
    Arc<ServiceContainer>,
    Arc<InMemStorage<State>>,
) {
    let router = TelegramRouter::new(services.clone());
    let storage = InMemStorage::<State>::new();

    (router, bot, services, storage)
}
