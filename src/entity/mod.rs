mod asset;
mod history_state;
mod state;
mod token_balance;
mod transaction;
mod transfer_record;
mod wallet_error;

pub use asset::Asset;
pub use history_state::{HistoryLoad, HistoryState};
pub use state::State;
pub use token_balance::{MintInfo, TokenAccountState, TokenBalance};
pub use transaction::{ParsedTransaction, SignatureRef, TokenBalanceEntry, TokenTransfer};
pub use transfer_record::{ConfirmationStatus, Direction, TransferRecord};
pub use wallet_error::WalletError;
