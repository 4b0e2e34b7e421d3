// Devnet USDC used by the wallet unless overridden in configuration
pub const USDC_MINT: &str = "Gh9ZwEmdLJ8DscKNTkTqPbNwLNNBjuSzaG9Vp2KGtKJr";

// Network defaults
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_EXPLORER_CLUSTER: &str = "devnet";
pub const EXPLORER_TX_URL: &str = "https://explorer.solana.com/tx";

// Native token decimals
pub const SOL_DECIMALS: u8 = 9;

// Payment requests
pub const PAYMENT_URI_SCHEME: &str = "solana";

// History
pub const DEFAULT_HISTORY_LIMIT: usize = 20;
pub const MAX_HISTORY_LIMIT: usize = 100;
