//! Conversion of `jsonParsed` transactions into the crate's `ParsedTransaction`.

use serde_json::Value;
use solana_account_decoder::parse_token::UiTokenAmount;
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta, EncodedTransaction, UiInstruction, UiMessage,
    UiParsedInstruction, UiTransactionTokenBalance,
};

use crate::entity::{ParsedTransaction, TokenBalanceEntry, TokenTransfer};

/// Returns `None` when the record has no status metadata.
pub fn parse_confirmed_transaction(
    confirmed: EncodedConfirmedTransactionWithStatusMeta,
) -> Option<ParsedTransaction> {
    let meta = confirmed.transaction.meta?;

    let pre_token_balances: Vec<UiTransactionTokenBalance> =
        Option::from(meta.pre_token_balances).unwrap_or_default();
    let post_token_balances: Vec<UiTransactionTokenBalance> =
        Option::from(meta.post_token_balances).unwrap_or_default();

    let token_transfers = match confirmed.transaction.transaction {
        EncodedTransaction::Json(transaction) => match transaction.message {
            UiMessage::Parsed(message) => message
                .instructions
                .iter()
                .filter_map(parse_ui_instruction)
                .collect(),
            UiMessage::Raw(_) => Vec::new(),
        },
        _ => Vec::new(),
    };

    Some(ParsedTransaction {
        slot: confirmed.slot,
        block_time: confirmed.block_time,
        failed: meta.err.is_some(),
        token_transfers,
        pre_token_balances: pre_token_balances
            .iter()
            .filter_map(token_balance_entry)
            .collect(),
        post_token_balances: post_token_balances
            .iter()
            .filter_map(token_balance_entry)
            .collect(),
    })
}

fn parse_ui_instruction(instruction: &UiInstruction) -> Option<TokenTransfer> {
    match instruction {
        UiInstruction::Parsed(UiParsedInstruction::Parsed(parsed)) => {
            parse_token_transfer(&parsed.program_id, &parsed.parsed)
        }
        _ => None,
    }
}

/// Decodes a parsed spl-token `transfer` or `transferChecked` instruction.
pub fn parse_token_transfer(program_id: &str, parsed: &Value) -> Option<TokenTransfer> {
    if program_id != spl_token::ID.to_string() {
        return None;
    }

    let info = parsed.get("info")?;
    let source = info.get("source")?.as_str()?.to_string();
    let destination = info.get("destination")?.as_str()?.to_string();

    let (mint, amount) = match parsed.get("type")?.as_str()? {
        "transfer" => (None, info.get("amount")?.as_str()?),
        "transferChecked" => (
            Some(info.get("mint")?.as_str()?.to_string()),
            info.get("tokenAmount")?.get("amount")?.as_str()?,
        ),
        _ => return None,
    };

    Some(TokenTransfer {
        source,
        destination,
        mint,
        amount: amount.parse().ok()?,
    })
}

fn token_balance_entry(balance: &UiTransactionTokenBalance) -> Option<TokenBalanceEntry> {
    Some(TokenBalanceEntry {
        account_index: balance.account_index,
        mint: balance.mint.clone(),
        owner: Option::from(balance.owner.clone()),
        amount: raw_amount(&balance.ui_token_amount)?,
    })
}

fn raw_amount(amount: &UiTokenAmount) -> Option<u64> {
    amount.amount.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SOURCE: &str = "7o36UsWR1JQLpZ9PE2gn9L4SQ69CNNiWAXd4Jt7rqz9Z";
    const DESTINATION: &str = "3Hk2tE1xF8yUMTJgK8pq4mBmWqN3LbjRM4oJD3GQ6hKX";
    const MINT: &str = "Gh9ZwEmdLJ8DscKNTkTqPbNwLNNBjuSzaG9Vp2KGtKJr";

    #[test]
    fn parses_transfer_checked() {
        let parsed = json!({
            "type": "transferChecked",
            "info": {
                "source": SOURCE,
                "destination": DESTINATION,
                "mint": MINT,
                "authority": SOURCE,
                "tokenAmount": {
                    "amount": "2500000",
                    "decimals": 6,
                    "uiAmount": 2.5,
                    "uiAmountString": "2.5"
                }
            }
        });

        let transfer = parse_token_transfer(&spl_token::ID.to_string(), &parsed).unwrap();

        assert_eq!(transfer.source, SOURCE);
        assert_eq!(transfer.destination, DESTINATION);
        assert_eq!(transfer.mint.as_deref(), Some(MINT));
        assert_eq!(transfer.amount, 2_500_000);
    }

    #[test]
    fn parses_plain_transfer_without_mint() {
        let parsed = json!({
            "type": "transfer",
            "info": {
                "source": SOURCE,
                "destination": DESTINATION,
                "authority": SOURCE,
                "amount": "42"
            }
        });

        let transfer = parse_token_transfer(&spl_token::ID.to_string(), &parsed).unwrap();

        assert_eq!(transfer.mint, None);
        assert_eq!(transfer.amount, 42);
    }

    #[test]
    fn ignores_other_programs_and_instruction_types() {
        let system_transfer = json!({
            "type": "transfer",
            "info": { "source": SOURCE, "destination": DESTINATION, "lamports": 10 }
        });
        assert!(parse_token_transfer("11111111111111111111111111111111", &system_transfer).is_none());

        let close = json!({
            "type": "closeAccount",
            "info": { "account": SOURCE, "destination": DESTINATION, "owner": SOURCE }
        });
        assert!(parse_token_transfer(&spl_token::ID.to_string(), &close).is_none());
    }
}
