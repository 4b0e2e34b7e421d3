use crate::entity::{Asset, Direction, HistoryState, TransferRecord};
use crate::utils;
use anyhow::Result;
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    Bot,
};

/// Telegram rejects messages longer than this many characters.
const MESSAGE_LIMIT: usize = 4096;
const OMITTED_NOTE_RESERVE: usize = 48;

#[async_trait]
pub trait HistoryView: Send + Sync {
    async fn display_loading(&self, state: &HistoryState) -> Result<Option<Message>>;
    async fn display_history(&self, state: &HistoryState, message: Option<Message>) -> Result<()>;
}

pub struct TelegramHistoryView {
    bot: Bot,
    chat_id: ChatId,
    explorer_cluster: String,
}

impl TelegramHistoryView {
    pub fn new(bot: Bot, chat_id: ChatId, explorer_cluster: String) -> Self {
        Self {
            bot,
            chat_id,
            explorer_cluster,
        }
    }

    fn keyboard() -> InlineKeyboardMarkup {
        InlineKeyboardMarkup::new(vec![vec![
            InlineKeyboardButton::callback("🔄 Refresh history", "refresh_history"),
            InlineKeyboardButton::callback("Menu", "menu"),
        ]])
    }
}

fn format_record(record: &TransferRecord, cluster: &str) -> String {
    let (arrow, preposition) = match record.direction {
        Direction::Sent => ("⬆️", "to"),
        Direction::Received => ("⬇️", "from"),
    };

    let counterparty = match &record.counterparty {
        Some(address) => utils::shorten_address(address),
        None => record.counterparty_or_unknown().to_string(),
    };

    format!(
        "{} <b>{}</b> {} {} {}\n{} · {} · <a href=\"{}\">explorer</a>",
        arrow,
        record.direction,
        utils::format_amount(record.amount, Asset::Usdc),
        preposition,
        counterparty,
        utils::format_timestamp(record.timestamp),
        record.status,
        utils::explorer_tx_url(&record.signature, cluster)
    )
}

pub fn format_history_text(state: &HistoryState, cluster: &str) -> String {
    let mut text = "<b>USDC transfers</b>\n\n".to_string();

    if state.loading {
        text.push_str("Loading transaction history...\n\n");
    }

    if let Some(error) = &state.error {
        text.push_str(&format!("⚠️ {}\n\n", utils::escape_html(error)));
    }

    if state.records.is_empty() {
        if !state.loading && state.error.is_none() {
            text.push_str("No transfers yet.");
        }
    } else {
        push_records(&mut text, &state.records, cluster);
    }

    text.trim_end().to_string()
}

/// Appends records while the message stays within Telegram's length limit,
/// then notes how many were left out.
fn push_records(text: &mut String, records: &[TransferRecord], cluster: &str) {
    let mut used = text.chars().count();

    for (shown, record) in records.iter().enumerate() {
        let entry = format_record(record, cluster);
        let separator = if shown == 0 { "" } else { "\n\n" };
        let remaining = records.len() - shown - 1;
        let reserve = if remaining > 0 { OMITTED_NOTE_RESERVE } else { 0 };

        let needed = separator.chars().count() + entry.chars().count();
        if used + needed + reserve > MESSAGE_LIMIT {
            text.push_str(&format!(
                "{}… {} older transfers not shown",
                separator,
                records.len() - shown
            ));
            return;
        }

        text.push_str(separator);
        text.push_str(&entry);
        used += needed;
    }
}

#[async_trait]
impl HistoryView for TelegramHistoryView {
    async fn display_loading(&self, state: &HistoryState) -> Result<Option<Message>> {
        let message = self
            .bot
            .send_message(
                self.chat_id,
                format_history_text(state, &self.explorer_cluster),
            )
            .parse_mode(ParseMode::Html)
            .await?;

        Ok(Some(message))
    }

    async fn display_history(&self, state: &HistoryState, message: Option<Message>) -> Result<()> {
        let text = format_history_text(state, &self.explorer_cluster);

        if let Some(msg) = message {
            self.bot
                .edit_message_text(self.chat_id, msg.id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(Self::keyboard())
                .await?;
        } else {
            self.bot
                .send_message(self.chat_id, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(Self::keyboard())
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ConfirmationStatus;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn sent_record() -> TransferRecord {
        TransferRecord {
            signature: "Sig1".to_string(),
            timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()),
            direction: Direction::Sent,
            amount: dec!(2.5),
            counterparty: Some("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string()),
            status: ConfirmationStatus::Confirmed,
            slot: 42,
        }
    }

    #[test]
    fn renders_record_line() {
        let state = HistoryState {
            records: vec![sent_record()],
            error: None,
            loading: false,
        };

        let text = format_history_text(&state, "devnet");

        assert!(text.contains("⬆️ <b>Sent</b> 2.500000 to EPjF...Dt1v"));
        assert!(text.contains("May 1, 12:30 UTC · confirmed"));
        assert!(text.contains("https://explorer.solana.com/tx/Sig1?cluster=devnet"));
    }

    #[test]
    fn unknown_counterparty() {
        let mut record = sent_record();
        record.direction = Direction::Received;
        record.counterparty = None;
        let state = HistoryState {
            records: vec![record],
            error: None,
            loading: false,
        };

        assert!(format_history_text(&state, "devnet").contains("from Unknown"));
    }

    #[test]
    fn empty_and_error_states() {
        assert!(format_history_text(&HistoryState::default(), "devnet").ends_with("No transfers yet."));

        let failed = HistoryState {
            records: vec![sent_record()],
            error: Some("Failed to load transaction history: rpc down".to_string()),
            loading: false,
        };
        let text = format_history_text(&failed, "devnet");
        assert!(text.contains("⚠️ Failed to load transaction history: rpc down"));
        assert!(text.contains("Sent"));
        assert!(!text.contains("No transfers yet."));
    }

    #[test]
    fn long_history_fits_one_message() {
        let records: Vec<TransferRecord> = (0..200)
            .map(|i| {
                let mut record = sent_record();
                record.signature = format!("Sig{}", i);
                record
            })
            .collect();
        let state = HistoryState {
            records,
            error: None,
            loading: false,
        };

        let text = format_history_text(&state, "devnet");

        assert!(text.chars().count() <= MESSAGE_LIMIT);
        assert!(text.contains("Sig0"));
        assert!(text.contains("older transfers not shown"));
    }

    #[test]
    fn short_history_is_not_truncated() {
        let state = HistoryState {
            records: vec![sent_record(), sent_record()],
            error: None,
            loading: false,
        };

        assert!(!format_history_text(&state, "devnet").contains("not shown"));
    }
}
