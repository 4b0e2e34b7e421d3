use anyhow::{anyhow, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::solana::tokens::constants::{
    DEFAULT_EXPLORER_CLUSTER, DEFAULT_HISTORY_LIMIT, DEFAULT_RPC_URL, MAX_HISTORY_LIMIT, USDC_MINT,
};

/// Application configuration
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    /// Telegram bot API token
    pub telegram_bot_token: String,

    /// Base58 encoded 64-byte keypair of the wallet
    pub wallet_keypair: String,

    #[serde(default = "default_rpc_url")]
    pub solana_rpc_url: String,

    /// Mint of the tracked USDC token
    #[serde(default = "default_usdc_mint")]
    pub usdc_mint: String,

    /// Cluster name used in explorer links
    #[serde(default = "default_explorer_cluster")]
    pub explorer_cluster: String,

    /// How many recent signatures the history screen loads
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Only this Telegram user may operate the wallet, when set
    #[serde(default)]
    pub owner_telegram_id: Option<i64>,

    /// Connect the wallet on start-up
    #[serde(default = "default_auto_connect")]
    pub auto_connect: bool,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_usdc_mint() -> String {
    USDC_MINT.to_string()
}

fn default_explorer_cluster() -> String {
    DEFAULT_EXPLORER_CLUSTER.to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_auto_connect() -> bool {
    true
}

impl AppConfig {
    /// Loads `wallet.toml` (optional), then environment variables on top.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name("wallet").required(false))
            .add_source(Environment::default().try_parsing(true))
            .build()
            .map_err(|e| anyhow!("Failed to read configuration: {}", e))?;

        Self::from_settings(settings)
    }

    pub fn from_settings(settings: Config) -> Result<Self> {
        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

        if config.history_limit == 0 || config.history_limit > MAX_HISTORY_LIMIT {
            return Err(anyhow!(
                "history_limit must be between 1 and {}",
                MAX_HISTORY_LIMIT
            ));
        }
        config.usdc_mint()?;

        Ok(config)
    }

    pub fn usdc_mint(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.usdc_mint)
            .map_err(|e| anyhow!("Invalid usdc_mint {}: {}", self.usdc_mint, e))
    }

    pub fn is_authorized(&self, telegram_id: i64) -> bool {
        self.owner_telegram_id
            .map_or(true, |owner| owner == telegram_id)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("telegram_bot_token", &"<redacted>")
            .field("wallet_keypair", &"<redacted>")
            .field("solana_rpc_url", &self.solana_rpc_url)
            .field("usdc_mint", &self.usdc_mint)
            .field("explorer_cluster", &self.explorer_cluster)
            .field("history_limit", &self.history_limit)
            .field("owner_telegram_id", &self.owner_telegram_id)
            .field("auto_connect", &self.auto_connect)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> config::ConfigBuilder<config::builder::DefaultState> {
        Config::builder()
            .set_override("telegram_bot_token", "123:token")
            .unwrap()
            .set_override("wallet_keypair", "secret")
            .unwrap()
    }

    #[test]
    fn fills_defaults() {
        let config = AppConfig::from_settings(required().build().unwrap()).unwrap();

        assert_eq!(config.solana_rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.usdc_mint, USDC_MINT);
        assert_eq!(config.explorer_cluster, "devnet");
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.owner_telegram_id, None);
        assert!(config.auto_connect);
        assert!(config.is_authorized(42));
    }

    #[test]
    fn owner_restricts_access() {
        let settings = required()
            .set_override("owner_telegram_id", 7i64)
            .unwrap()
            .build()
            .unwrap();
        let config = AppConfig::from_settings(settings).unwrap();

        assert!(config.is_authorized(7));
        assert!(!config.is_authorized(8));
    }

    #[test]
    fn rejects_missing_token_and_bad_mint() {
        let missing = Config::builder().build().unwrap();
        assert!(AppConfig::from_settings(missing).is_err());

        let bad_mint = required()
            .set_override("usdc_mint", "not-a-mint")
            .unwrap()
            .build()
            .unwrap();
        assert!(AppConfig::from_settings(bad_mint).is_err());
    }

    #[test]
    fn history_limit_must_stay_within_bounds() {
        for limit in [0i64, 101] {
            let settings = required()
                .set_override("history_limit", limit)
                .unwrap()
                .build()
                .unwrap();
            assert!(AppConfig::from_settings(settings).is_err());
        }

        let settings = required()
            .set_override("history_limit", 100i64)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(AppConfig::from_settings(settings).unwrap().history_limit, 100);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = AppConfig::from_settings(required().build().unwrap()).unwrap();

        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("123:token"));
    }
}
