use anyhow::Result;
use log::info;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::entity::HistoryState;
use crate::solana::client::ChainRpc;
use crate::solana::wallet::WalletAdapter;

/// ServiceContainer is the process-wide wallet/network context: created once
/// at start-up, shared by every handler, shut down when the bot stops.
pub struct ServiceContainer {
    // Core services
    solana_client: Arc<dyn ChainRpc>,
    wallet: Arc<dyn WalletAdapter>,

    // Per-chat history screen
    history_states: Mutex<HashMap<i64, HistoryState>>,

    // Configuration
    config: AppConfig,
    usdc_mint: Pubkey,
}

impl ServiceContainer {
    pub fn new(
        config: AppConfig,
        solana_client: Arc<dyn ChainRpc>,
        wallet: Arc<dyn WalletAdapter>,
    ) -> Result<Self> {
        let usdc_mint = config.usdc_mint()?;

        Ok(Self {
            solana_client,
            wallet,
            history_states: Mutex::new(HashMap::new()),
            config,
            usdc_mint,
        })
    }

    /// Connects the wallet when configured to do so.
    pub async fn start(&self) -> Result<()> {
        if self.config.auto_connect {
            let address = self.wallet.connect().await?;
            info!("Auto-connected wallet {}", address);
        }
        Ok(())
    }

    /// Disconnects the wallet and drops per-chat state.
    pub async fn shutdown(&self) -> Result<()> {
        self.history_states.lock().await.clear();
        if self.wallet.public_key().is_some() {
            self.wallet.disconnect().await?;
        }
        Ok(())
    }

    // Accessor methods

    pub fn solana_client(&self) -> Arc<dyn ChainRpc> {
        self.solana_client.clone()
    }

    pub fn wallet(&self) -> Arc<dyn WalletAdapter> {
        self.wallet.clone()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn usdc_mint(&self) -> Pubkey {
        self.usdc_mint
    }

    pub fn is_authorized(&self, telegram_id: i64) -> bool {
        self.config.is_authorized(telegram_id)
    }

    pub async fn history_state(&self, chat_id: i64) -> Option<HistoryState> {
        self.history_states.lock().await.get(&chat_id).cloned()
    }

    pub async fn set_history_state(&self, chat_id: i64, state: HistoryState) {
        self.history_states.lock().await.insert(chat_id, state);
    }

    /// Forgets every chat's history, e.g. after the wallet identity changed.
    pub async fn clear_history_states(&self) {
        self.history_states.lock().await.clear();
    }
}
