// Re-export submodules
pub mod constants;
pub mod native;
pub mod spl;
pub mod transaction;

// Re-export commonly used items
pub use constants::USDC_MINT;
pub use native::{get_sol_balance, send_sol};
pub use spl::{get_token_balance, load_mint, prepare_to_receive, send_spl_token};
pub use transaction::send_transaction;
