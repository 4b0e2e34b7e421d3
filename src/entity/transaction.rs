use crate::entity::ConfirmationStatus;
use serde::{Deserialize, Serialize};

/// A recent-signature entry for an address, as listed by the node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignatureRef {
    pub signature: String,
    pub slot: u64,
    /// Approximate unix time of the block.
    pub block_time: Option<i64>,
    pub status: ConfirmationStatus,
}

/// Decoded spl-token transfer instruction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenTransfer {
    pub source: String,
    pub destination: String,
    /// Only present on `transferChecked`.
    pub mint: Option<String>,
    /// Raw base units.
    pub amount: u64,
}

/// Token balance entry from a transaction's pre/post balance lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenBalanceEntry {
    pub account_index: u8,
    pub mint: String,
    pub owner: Option<String>,
    /// Raw base units.
    pub amount: u64,
}

/// The parts of a parsed transaction the history reconciler reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParsedTransaction {
    pub slot: u64,
    pub block_time: Option<i64>,
    /// True when the transaction metadata carries an error.
    pub failed: bool,
    pub token_transfers: Vec<TokenTransfer>,
    pub pre_token_balances: Vec<TokenBalanceEntry>,
    pub post_token_balances: Vec<TokenBalanceEntry>,
}
