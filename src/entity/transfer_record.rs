use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Sent => write!(f, "Sent"),
            Direction::Received => write!(f, "Received"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ConfirmationStatus {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl std::fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfirmationStatus::Processed => write!(f, "processed"),
            ConfirmationStatus::Confirmed => write!(f, "confirmed"),
            ConfirmationStatus::Finalized => write!(f, "finalized"),
        }
    }
}

/// One sent/received event for the tracked token, rebuilt on every history fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferRecord {
    pub signature: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub direction: Direction,
    /// Always non-negative, already divided by 10^decimals.
    pub amount: Decimal,
    /// Token account on the other side, when the instruction names it.
    pub counterparty: Option<String>,
    pub status: ConfirmationStatus,
    pub slot: u64,
}

impl TransferRecord {
    pub fn counterparty_or_unknown(&self) -> &str {
        self.counterparty.as_deref().unwrap_or("Unknown")
    }
}
