use crate::entity::TransferRecord;

/// How a history fetch was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryLoad {
    /// First load for a chat, or after the wallet changed.
    Initial,
    /// User pressed refresh while a list is already shown.
    Refresh,
}

/// What the history screen of one chat currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryState {
    pub records: Vec<TransferRecord>,
    pub error: Option<String>,
    pub loading: bool,
}

impl HistoryState {
    pub fn begin(&self, load: HistoryLoad) -> Self {
        let records = match load {
            HistoryLoad::Initial => Vec::new(),
            HistoryLoad::Refresh => self.records.clone(),
        };

        Self {
            records,
            error: None,
            loading: true,
        }
    }

    /// A failed initial load clears the list; a failed refresh keeps the previous one.
    pub fn complete(
        self,
        result: Result<Vec<TransferRecord>, String>,
        load: HistoryLoad,
    ) -> Self {
        match result {
            Ok(records) => Self {
                records,
                error: None,
                loading: false,
            },
            Err(error) => Self {
                records: match load {
                    HistoryLoad::Initial => Vec::new(),
                    HistoryLoad::Refresh => self.records,
                },
                error: Some(error),
                loading: false,
            },
        }
    }
}
