pub mod client;
pub mod history;
pub mod parse;
pub mod tokens;
pub mod utils;
pub mod wallet;

// Re-export commonly used items
pub use client::{create_solana_client, ChainRpc, RpcChain};
pub use history::{fetch_history, reconcile, HistoryQuery, Reconciliation, SkipReason};
pub use tokens::constants::USDC_MINT;
pub use tokens::native::{get_sol_balance, send_sol};
pub use tokens::spl::{get_token_balance, load_mint, prepare_to_receive, send_spl_token};
pub use utils::{
    check_decimals, from_base_units, to_base_units, token_account_address, MAX_TOKEN_DECIMALS,
};
pub use wallet::{keypair_from_base58, KeypairWallet, WalletAdapter};
