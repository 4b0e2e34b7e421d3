//! Token transfer history rebuilt from recent transactions of one token account.
//!
//! Each transaction yields at most one [`TransferRecord`]. The decoded
//! instruction list is tried first; if no spl-token transfer touches the
//! account, the owner's pre/post token balances are diffed instead. Records
//! that cannot be used are not errors: they are returned as
//! [`SkippedTransaction`]s with a reason so the result stays auditable.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, info};
use solana_sdk::pubkey::Pubkey;
use std::collections::HashSet;

use crate::entity::{
    Direction, ParsedTransaction, SignatureRef, TransferRecord, WalletError,
};
use crate::solana::client::ChainRpc;
use crate::solana::tokens::spl::load_mint;
use crate::solana::utils::{from_base_units, token_account_address};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The node returned no usable record, or fetching it failed.
    NotFound,
    /// The transaction carries an on-chain error.
    FailedOnChain,
    /// Neither a matching instruction nor a balance change was found.
    NoMatch,
    /// The signature was already reconciled.
    Duplicate,
    /// The amount cannot be expressed at the mint's decimals.
    AmountOutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTransaction {
    pub signature: String,
    pub reason: SkipReason,
}

/// Whose history is being rebuilt, for which token.
#[derive(Debug, Clone)]
pub struct HistoryQuery {
    pub owner: String,
    pub mint: String,
    pub token_account: String,
    pub decimals: u8,
}

impl HistoryQuery {
    pub fn new(owner: &Pubkey, mint: &Pubkey, decimals: u8) -> Self {
        Self {
            owner: owner.to_string(),
            mint: mint.to_string(),
            token_account: token_account_address(owner, mint).to_string(),
            decimals,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Most recent first.
    pub records: Vec<TransferRecord>,
    pub skipped: Vec<SkippedTransaction>,
}

struct Extracted {
    direction: Direction,
    raw_amount: u64,
    counterparty: Option<String>,
}

/// Instruction pass: a token transfer whose source or destination is the account.
fn extract_from_instructions(query: &HistoryQuery, tx: &ParsedTransaction) -> Option<Extracted> {
    tx.token_transfers.iter().find_map(|transfer| {
        // Plain `transfer` has no mint; the account itself only ever holds the target mint.
        if transfer.mint.as_deref().is_some_and(|mint| mint != query.mint) {
            return None;
        }

        if transfer.source == query.token_account {
            Some(Extracted {
                direction: Direction::Sent,
                raw_amount: transfer.amount,
                counterparty: Some(transfer.destination.clone()),
            })
        } else if transfer.destination == query.token_account {
            Some(Extracted {
                direction: Direction::Received,
                raw_amount: transfer.amount,
                counterparty: Some(transfer.source.clone()),
            })
        } else {
            None
        }
    })
}

/// Balance pass: the owner's pre balance for the mint against the post balance
/// at the same account index.
fn extract_from_balance_diff(query: &HistoryQuery, tx: &ParsedTransaction) -> Option<Extracted> {
    tx.pre_token_balances
        .iter()
        .filter(|pre| pre.mint == query.mint && pre.owner.as_deref() == Some(query.owner.as_str()))
        .find_map(|pre| {
            let post = tx
                .post_token_balances
                .iter()
                .find(|post| post.account_index == pre.account_index)?;

            let diff = post.amount as i128 - pre.amount as i128;
            if diff == 0 {
                return None;
            }

            Some(Extracted {
                direction: if diff > 0 {
                    Direction::Received
                } else {
                    Direction::Sent
                },
                raw_amount: diff.unsigned_abs() as u64,
                counterparty: None,
            })
        })
}

fn timestamp(reference: &SignatureRef, tx: &ParsedTransaction) -> Option<DateTime<Utc>> {
    reference
        .block_time
        .or(tx.block_time)
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
}

/// Turns fetched transactions into transfer records.
///
/// `entries` pairs each signature reference with its fetched record (`None`
/// when it could not be fetched).
pub fn reconcile(
    query: &HistoryQuery,
    entries: Vec<(SignatureRef, Option<ParsedTransaction>)>,
) -> Reconciliation {
    let mut result = Reconciliation::default();
    let mut seen = HashSet::new();

    for (reference, transaction) in entries {
        let skip = |reason| SkippedTransaction {
            signature: reference.signature.clone(),
            reason,
        };

        if !seen.insert(reference.signature.clone()) {
            result.skipped.push(skip(SkipReason::Duplicate));
            continue;
        }

        let Some(tx) = transaction else {
            result.skipped.push(skip(SkipReason::NotFound));
            continue;
        };

        if tx.failed {
            result.skipped.push(skip(SkipReason::FailedOnChain));
            continue;
        }

        let Some(extracted) = extract_from_instructions(query, &tx)
            .or_else(|| extract_from_balance_diff(query, &tx))
        else {
            result.skipped.push(skip(SkipReason::NoMatch));
            continue;
        };

        let Ok(amount) = from_base_units(extracted.raw_amount, query.decimals) else {
            result.skipped.push(skip(SkipReason::AmountOutOfRange));
            continue;
        };

        result.records.push(TransferRecord {
            signature: reference.signature.clone(),
            timestamp: timestamp(&reference, &tx),
            direction: extracted.direction,
            amount,
            counterparty: extracted.counterparty,
            status: reference.status,
            slot: if reference.slot > 0 { reference.slot } else { tx.slot },
        });
    }

    // Newest first by slot; the sort is stable so same-slot order is kept.
    result.records.sort_by(|a, b| b.slot.cmp(&a.slot));

    for skipped in &result.skipped {
        debug!("Skipped {}: {:?}", skipped.signature, skipped.reason);
    }

    result
}

/// Fetches and reconciles the latest `limit` transactions of the owner's token
/// account for `mint`.
pub async fn fetch_history(
    client: &dyn ChainRpc,
    owner: &Pubkey,
    mint: &Pubkey,
    limit: usize,
) -> Result<Reconciliation> {
    let mint_info = load_mint(client, mint)
        .await
        .map_err(|e| WalletError::HistoryUnavailable(e.to_string()))?;

    let query = HistoryQuery::new(owner, mint, mint_info.decimals);
    debug!("Fetching history of token account {}", query.token_account);

    let references = client
        .get_signatures_for_address(&token_account_address(owner, mint), limit)
        .await
        .map_err(|e| WalletError::HistoryUnavailable(e.to_string()))?;

    if references.is_empty() {
        return Ok(Reconciliation::default());
    }

    info!("Found {} signatures", references.len());

    let mut entries = Vec::with_capacity(references.len());
    for reference in references {
        let transaction = match client.get_parsed_transaction(&reference.signature).await {
            Ok(transaction) => transaction,
            Err(e) => {
                debug!("Could not fetch {}: {}", reference.signature, e);
                None
            }
        };
        entries.push((reference, transaction));
    }

    let reconciliation = reconcile(&query, entries);
    info!(
        "Processed {} token transfers, skipped {}",
        reconciliation.records.len(),
        reconciliation.skipped.len()
    );

    Ok(reconciliation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ConfirmationStatus, TokenBalanceEntry, TokenTransfer};
    use rust_decimal_macros::dec;

    fn query() -> HistoryQuery {
        HistoryQuery {
            owner: "Owner1111".to_string(),
            mint: "Mint1111".to_string(),
            token_account: "OwnerAta".to_string(),
            decimals: 6,
        }
    }

    fn reference(signature: &str, slot: u64) -> SignatureRef {
        SignatureRef {
            signature: signature.to_string(),
            slot,
            block_time: Some(1_700_000_000),
            status: ConfirmationStatus::Finalized,
        }
    }

    fn transfer(source: &str, destination: &str, mint: Option<&str>, amount: u64) -> TokenTransfer {
        TokenTransfer {
            source: source.to_string(),
            destination: destination.to_string(),
            mint: mint.map(str::to_string),
            amount,
        }
    }

    fn balance(index: u8, mint: &str, owner: &str, amount: u64) -> TokenBalanceEntry {
        TokenBalanceEntry {
            account_index: index,
            mint: mint.to_string(),
            owner: Some(owner.to_string()),
            amount,
        }
    }

    #[test]
    fn instruction_from_own_account_is_sent() {
        let tx = ParsedTransaction {
            token_transfers: vec![transfer("OwnerAta", "OtherAta", Some("Mint1111"), 2_500_000)],
            ..Default::default()
        };

        let result = reconcile(&query(), vec![(reference("sig1", 5), Some(tx))]);

        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.direction, Direction::Sent);
        assert_eq!(record.amount, dec!(2.5));
        assert_eq!(record.counterparty.as_deref(), Some("OtherAta"));
        assert_eq!(record.status, ConfirmationStatus::Finalized);
        assert_eq!(record.slot, 5);
        assert!(record.timestamp.is_some());
    }

    #[test]
    fn instruction_into_own_account_is_received() {
        let tx = ParsedTransaction {
            token_transfers: vec![transfer("OtherAta", "OwnerAta", None, 1_000_000)],
            ..Default::default()
        };

        let result = reconcile(&query(), vec![(reference("sig1", 5), Some(tx))]);

        assert_eq!(result.records[0].direction, Direction::Received);
        assert_eq!(result.records[0].amount, dec!(1));
        assert_eq!(result.records[0].counterparty.as_deref(), Some("OtherAta"));
    }

    #[test]
    fn instruction_for_other_mint_falls_back_to_balances() {
        let tx = ParsedTransaction {
            token_transfers: vec![transfer("OwnerAta", "OtherAta", Some("OtherMint"), 7)],
            pre_token_balances: vec![balance(1, "Mint1111", "Owner1111", 10_000_000)],
            post_token_balances: vec![balance(1, "Mint1111", "Owner1111", 12_500_000)],
            ..Default::default()
        };

        let result = reconcile(&query(), vec![(reference("sig1", 5), Some(tx))]);

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].direction, Direction::Received);
        assert_eq!(result.records[0].amount, dec!(2.5));
        assert_eq!(result.records[0].counterparty, None);
        assert_eq!(result.records[0].counterparty_or_unknown(), "Unknown");
    }

    #[test]
    fn balance_decrease_is_sent() {
        let tx = ParsedTransaction {
            pre_token_balances: vec![balance(2, "Mint1111", "Owner1111", 5_000_000)],
            post_token_balances: vec![balance(2, "Mint1111", "Owner1111", 4_250_000)],
            ..Default::default()
        };

        let result = reconcile(&query(), vec![(reference("sig1", 5), Some(tx))]);

        assert_eq!(result.records[0].direction, Direction::Sent);
        assert_eq!(result.records[0].amount, dec!(0.75));
    }

    #[test]
    fn first_match_wins_so_each_signature_yields_one_record() {
        let tx = ParsedTransaction {
            token_transfers: vec![transfer("OwnerAta", "OtherAta", Some("Mint1111"), 2_500_000)],
            pre_token_balances: vec![balance(1, "Mint1111", "Owner1111", 10_000_000)],
            post_token_balances: vec![balance(1, "Mint1111", "Owner1111", 7_500_000)],
            ..Default::default()
        };

        let result = reconcile(
            &query(),
            vec![
                (reference("sig1", 5), Some(tx.clone())),
                (reference("sig1", 5), Some(tx)),
            ],
        );

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].counterparty.as_deref(), Some("OtherAta"));
        assert_eq!(
            result.skipped,
            vec![SkippedTransaction {
                signature: "sig1".to_string(),
                reason: SkipReason::Duplicate,
            }]
        );
    }

    #[test]
    fn failed_and_missing_transactions_are_skipped_with_reasons() {
        let failed = ParsedTransaction {
            failed: true,
            token_transfers: vec![transfer("OwnerAta", "OtherAta", Some("Mint1111"), 1)],
            pre_token_balances: vec![balance(1, "Mint1111", "Owner1111", 10)],
            post_token_balances: vec![balance(1, "Mint1111", "Owner1111", 9)],
            ..Default::default()
        };
        let unrelated = ParsedTransaction {
            pre_token_balances: vec![balance(1, "Mint1111", "SomeoneElse", 10)],
            post_token_balances: vec![balance(1, "Mint1111", "SomeoneElse", 20)],
            ..Default::default()
        };
        let unchanged = ParsedTransaction {
            pre_token_balances: vec![balance(1, "Mint1111", "Owner1111", 10)],
            post_token_balances: vec![balance(1, "Mint1111", "Owner1111", 10)],
            ..Default::default()
        };

        let result = reconcile(
            &query(),
            vec![
                (reference("failed", 4), Some(failed)),
                (reference("missing", 3), None),
                (reference("unrelated", 2), Some(unrelated)),
                (reference("unchanged", 1), Some(unchanged)),
            ],
        );

        assert!(result.records.is_empty());
        let reasons: Vec<SkipReason> = result.skipped.iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::FailedOnChain,
                SkipReason::NotFound,
                SkipReason::NoMatch,
                SkipReason::NoMatch,
            ]
        );
    }

    #[test]
    fn amount_at_unsupported_decimals_is_skipped() {
        let tx = ParsedTransaction {
            token_transfers: vec![transfer("OwnerAta", "OtherAta", Some("Mint1111"), 1)],
            ..Default::default()
        };
        let query = HistoryQuery {
            decimals: 29,
            ..query()
        };

        let result = reconcile(&query, vec![(reference("sig1", 5), Some(tx))]);

        assert!(result.records.is_empty());
        assert_eq!(
            result.skipped,
            vec![SkippedTransaction {
                signature: "sig1".to_string(),
                reason: SkipReason::AmountOutOfRange,
            }]
        );
    }

    #[test]
    fn balance_without_post_entry_yields_nothing() {
        let tx = ParsedTransaction {
            pre_token_balances: vec![balance(1, "Mint1111", "Owner1111", 10)],
            post_token_balances: vec![balance(3, "Mint1111", "Owner1111", 20)],
            ..Default::default()
        };

        let result = reconcile(&query(), vec![(reference("sig1", 5), Some(tx))]);

        assert!(result.records.is_empty());
        assert_eq!(result.skipped[0].reason, SkipReason::NoMatch);
    }

    #[test]
    fn records_are_ordered_newest_slot_first() {
        let incoming = |amount| ParsedTransaction {
            token_transfers: vec![transfer("OtherAta", "OwnerAta", None, amount)],
            ..Default::default()
        };

        let result = reconcile(
            &query(),
            vec![
                (reference("older", 10), Some(incoming(1))),
                (reference("newest", 30), Some(incoming(2))),
                (reference("middle", 20), Some(incoming(3))),
            ],
        );

        let order: Vec<&str> = result
            .records
            .iter()
            .map(|record| record.signature.as_str())
            .collect();
        assert_eq!(order, vec!["newest", "middle", "older"]);
    }
}
