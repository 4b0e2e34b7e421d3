#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use usdc_wallet_bot::{
    ChainRpc, ConfirmationStatus, KeypairWallet, MintInfo, ParsedTransaction, SignatureRef,
    WalletAdapter,
};

/// In-memory node. Every trait call is counted.
pub struct FakeChain {
    /// `None` makes mint lookups fail.
    pub decimals: Option<u8>,
    pub token_accounts: Mutex<HashMap<Pubkey, u64>>,
    pub lamports: Mutex<HashMap<Pubkey, u64>>,
    pub existing_accounts: Mutex<HashSet<Pubkey>>,
    /// `None` makes the signature listing fail.
    pub signatures: Option<Vec<SignatureRef>>,
    pub transactions: HashMap<String, ParsedTransaction>,
    pub fail_send: bool,
    pub sent: Mutex<Vec<Transaction>>,
    calls: AtomicUsize,
    transaction_fetches: AtomicUsize,
}

impl FakeChain {
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals: Some(decimals),
            token_accounts: Mutex::new(HashMap::new()),
            lamports: Mutex::new(HashMap::new()),
            existing_accounts: Mutex::new(HashSet::new()),
            signatures: Some(Vec::new()),
            transactions: HashMap::new(),
            fail_send: false,
            sent: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            transaction_fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_token_account(self, account: Pubkey, amount: u64) -> Self {
        self.token_accounts.lock().unwrap().insert(account, amount);
        self.existing_accounts.lock().unwrap().insert(account);
        self
    }

    pub fn with_lamports(self, address: Pubkey, lamports: u64) -> Self {
        self.lamports.lock().unwrap().insert(address, lamports);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn transaction_fetches(&self) -> usize {
        self.transaction_fetches.load(Ordering::SeqCst)
    }

    pub fn sent_transactions(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChainRpc for FakeChain {
    async fn get_mint_info(&self, mint: &Pubkey) -> Result<MintInfo> {
        self.count();
        let decimals = self.decimals.ok_or_else(|| anyhow!("mint not found"))?;
        Ok(MintInfo {
            mint: *mint,
            decimals,
        })
    }

    async fn get_token_account_amount(&self, token_account: &Pubkey) -> Result<Option<u64>> {
        self.count();
        Ok(self.token_accounts.lock().unwrap().get(token_account).copied())
    }

    async fn get_sol_balance(&self, address: &Pubkey) -> Result<u64> {
        self.count();
        Ok(self
            .lamports
            .lock()
            .unwrap()
            .get(address)
            .copied()
            .unwrap_or(0))
    }

    async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        self.count();
        Ok(self.existing_accounts.lock().unwrap().contains(address))
    }

    async fn get_signatures_for_address(
        &self,
        _address: &Pubkey,
        limit: usize,
    ) -> Result<Vec<SignatureRef>> {
        self.count();
        let signatures = self
            .signatures
            .clone()
            .ok_or_else(|| anyhow!("connection refused"))?;
        Ok(signatures.into_iter().take(limit).collect())
    }

    async fn get_parsed_transaction(&self, signature: &str) -> Result<Option<ParsedTransaction>> {
        self.count();
        self.transaction_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.transactions.get(signature).cloned())
    }

    async fn get_latest_blockhash(&self) -> Result<Hash> {
        self.count();
        Ok(Hash::new_unique())
    }

    async fn send_and_confirm_transaction(&self, transaction: &Transaction) -> Result<Signature> {
        self.count();
        if self.fail_send {
            return Err(anyhow!("insufficient funds for fee"));
        }
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }
}

pub async fn connected_wallet() -> Arc<KeypairWallet> {
    let wallet = Arc::new(KeypairWallet::new(Keypair::new()));
    wallet.connect().await.unwrap();
    wallet
}

pub fn reference(signature: &str, slot: u64) -> SignatureRef {
    SignatureRef {
        signature: signature.to_string(),
        slot,
        block_time: Some(1_714_566_600),
        status: ConfirmationStatus::Confirmed,
    }
}
