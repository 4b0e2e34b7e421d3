#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Solana client error: {0}")]
    SolanaClient(String),

    #[error("Wallet is not connected")]
    WalletNotConnected,

    #[error("Enter the recipient's address")]
    EmptyRecipient,

    #[error("Invalid amount: enter a number greater than zero")]
    InvalidAmount,

    #[error("Invalid recipient address")]
    InvalidRecipient,

    #[error("Failed to load token info: {0}")]
    MintUnavailable(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Failed to load transaction history: {0}")]
    HistoryUnavailable(String),
}
