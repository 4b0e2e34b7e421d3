use anyhow::Result;
use log::debug;
use solana_sdk::{
    instruction::Instruction, pubkey::Pubkey, signature::Signature,
    transaction::Transaction as SolanaTransaction,
};

use crate::solana::client::ChainRpc;
use crate::solana::wallet::WalletAdapter;

/// Execute a transaction with the provided instructions, paid and signed by the wallet
pub async fn send_transaction(
    client: &dyn ChainRpc,
    wallet: &dyn WalletAdapter,
    payer: &Pubkey,
    instructions: &[Instruction],
) -> Result<Signature> {
    // Get recent blockhash
    let recent_blockhash = client.get_latest_blockhash().await?;

    let mut transaction = SolanaTransaction::new_with_payer(instructions, Some(payer));
    transaction.message.recent_blockhash = recent_blockhash;

    let transaction = wallet.sign_transaction(transaction).await?;

    debug!(
        "Submitting transaction with {} instruction(s)",
        instructions.len()
    );

    // Send and wait for confirmation
    client.send_and_confirm_transaction(&transaction).await
}
