//! USDC Wallet Bot for Telegram - Main executable
//!
//! Entry point of the Telegram front-end for a single Solana wallet: SOL and
//! USDC balances, transfers, payment request QR codes and USDC history.
use anyhow::Context;
use dotenv::dotenv;
use log::{error, info};
use std::sync::Arc;
use teloxide::{dptree, Bot};
use usdc_wallet_bot::{create_solana_client, AppConfig, KeypairWallet, Router, ServiceContainer};

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!("Starting USDC Wallet Bot v{}", usdc_wallet_bot::VERSION);

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!("Configuration: {:?}", config);

    let bot = Bot::new(&config.telegram_bot_token);

    // Initialize Solana client
    info!("Connecting to Solana network at {}...", config.solana_rpc_url);
    let solana_client =
        create_solana_client(&config.solana_rpc_url).context("Failed to create Solana client")?;

    let wallet = KeypairWallet::from_base58(&config.wallet_keypair)
        .context("Failed to load wallet keypair")?;

    let service_container = Arc::new(
        ServiceContainer::new(config, solana_client, Arc::new(wallet))
            .context("Failed to create service container")?,
    );
    service_container
        .start()
        .await
        .context("Failed to connect wallet")?;

    info!("Initializing bot application...");
    let (router, bot, service_container, storage) =
        usdc_wallet_bot::create_application(bot, service_container);

    // Get the handler from the router
    let handler = router.setup_handlers();

    // Build dispatcher with dependency injections and control-C handling
    let mut dispatcher = teloxide::dispatching::Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![service_container.clone(), storage])
        .enable_ctrlc_handler()
        .build();

    info!("Bot is running! Press Ctrl+C to stop.");
    dispatcher.dispatch().await;

    info!("Shutting down...");
    if let Err(e) = service_container.shutdown().await {
        error!("Failed to disconnect wallet: {}", e);
    }

    Ok(())
}
