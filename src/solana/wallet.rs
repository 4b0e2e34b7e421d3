use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::info;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::sync::RwLock;

use crate::entity::WalletError;

/// The signing side of the wallet: connection state, identity and signatures.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Identity of the connected wallet, `None` while disconnected.
    fn public_key(&self) -> Option<Pubkey>;

    async fn connect(&self) -> Result<Pubkey>;

    async fn disconnect(&self) -> Result<()>;

    /// Signs a transaction whose recent blockhash is already set.
    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction>;
}

/// Wallet adapter over a locally supplied keypair.
pub struct KeypairWallet {
    keypair: Keypair,
    connected: RwLock<bool>,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair,
            connected: RwLock::new(false),
        }
    }

    pub fn from_base58(keypair_base58: &str) -> Result<Self> {
        Ok(Self::new(keypair_from_base58(keypair_base58)?))
    }

    fn is_connected(&self) -> bool {
        self.connected.read().map(|guard| *guard).unwrap_or(false)
    }

    fn set_connected(&self, value: bool) -> Result<()> {
        let mut guard = self
            .connected
            .write()
            .map_err(|_| anyhow!("Wallet state lock poisoned"))?;
        *guard = value;
        Ok(())
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.is_connected().then(|| self.keypair.pubkey())
    }

    async fn connect(&self) -> Result<Pubkey> {
        self.set_connected(true)?;
        info!("Wallet {} connected", self.keypair.pubkey());
        Ok(self.keypair.pubkey())
    }

    async fn disconnect(&self) -> Result<()> {
        self.set_connected(false)?;
        info!("Wallet {} disconnected", self.keypair.pubkey());
        Ok(())
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> Result<Transaction> {
        if !self.is_connected() {
            return Err(WalletError::WalletNotConnected.into());
        }

        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_sign(&[&self.keypair], blockhash)
            .map_err(|e| anyhow!("Failed to sign transaction: {}", e))?;

        Ok(transaction)
    }
}

/// Restore Keypair from base58 string (64 bytes).
pub fn keypair_from_base58(keypair_base58: &str) -> Result<Keypair> {
    let keypair_bytes = bs58::decode(keypair_base58.trim())
        .into_vec()
        .map_err(|e| anyhow!("Failed to decode base58 keypair: {}", e))?;

    if keypair_bytes.len() != 64 {
        return Err(anyhow!("Invalid keypair length: {}", keypair_bytes.len()));
    }

    let keypair = Keypair::from_bytes(&keypair_bytes)
        .map_err(|e| anyhow!("Failed to create keypair from bytes: {}", e))?;

    Ok(keypair)
}
