use crate::entity::{HistoryLoad, HistoryState};
use crate::interactor::history_interactor::HistoryInteractor;
use crate::view::history_view::HistoryView;
use anyhow::Result;
use async_trait::async_trait;
use log::error;
use std::sync::Arc;

#[async_trait]
pub trait HistoryPresenter: Send + Sync {
    /// Loads and shows the history. `previous` is what the chat showed
    /// before; when present the load counts as a refresh.
    async fn show_history(&self, previous: Option<HistoryState>) -> Result<HistoryState>;
}

pub struct HistoryPresenterImpl<I, V> {
    interactor: Arc<I>,
    view: Arc<V>,
}

impl<I, V> HistoryPresenterImpl<I, V>
where
    I: HistoryInteractor,
    V: HistoryView,
{
    pub fn new(interactor: Arc<I>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<I, V> HistoryPresenter for HistoryPresenterImpl<I, V>
where
    I: HistoryInteractor + Send + Sync,
    V: HistoryView + Send + Sync,
{
    async fn show_history(&self, previous: Option<HistoryState>) -> Result<HistoryState> {
        let load = if previous.is_some() {
            HistoryLoad::Refresh
        } else {
            HistoryLoad::Initial
        };

        let loading = previous.unwrap_or_default().begin(load);
        let message = self.view.display_loading(&loading).await?;

        let result = self
            .interactor
            .get_transfer_history()
            .await
            .map_err(|e| {
                error!("Failed to load history: {}", e);
                e.to_string()
            });

        let state = loading.complete(result, load);
        self.view.display_history(&state, message).await?;

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ConfirmationStatus, Direction, TransferRecord, WalletError};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;
    use teloxide::types::Message;

    struct FakeInteractor {
        fail: bool,
    }

    #[async_trait]
    impl HistoryInteractor for FakeInteractor {
        async fn get_transfer_history(&self) -> Result<Vec<TransferRecord>> {
            if self.fail {
                return Err(WalletError::HistoryUnavailable("rpc down".to_string()).into());
            }
            Ok(vec![TransferRecord {
                signature: "Fresh".to_string(),
                timestamp: None,
                direction: Direction::Received,
                amount: dec!(1),
                counterparty: None,
                status: ConfirmationStatus::Confirmed,
                slot: 2,
            }])
        }
    }

    #[derive(Default)]
    struct RecordingView {
        shown: Mutex<Vec<HistoryState>>,
    }

    #[async_trait]
    impl HistoryView for RecordingView {
        async fn display_loading(&self, state: &HistoryState) -> Result<Option<Message>> {
            self.shown.lock().unwrap().push(state.clone());
            Ok(None)
        }

        async fn display_history(
            &self,
            state: &HistoryState,
            _message: Option<Message>,
        ) -> Result<()> {
            self.shown.lock().unwrap().push(state.clone());
            Ok(())
        }
    }

    fn shown_before() -> HistoryState {
        HistoryState {
            records: vec![TransferRecord {
                signature: "Old".to_string(),
                timestamp: None,
                direction: Direction::Sent,
                amount: dec!(3),
                counterparty: None,
                status: ConfirmationStatus::Confirmed,
                slot: 1,
            }],
            error: None,
            loading: false,
        }
    }

    #[tokio::test]
    async fn first_load_shows_loading_then_records() {
        let view = Arc::new(RecordingView::default());
        let presenter =
            HistoryPresenterImpl::new(Arc::new(FakeInteractor { fail: false }), view.clone());

        let state = presenter.show_history(None).await.unwrap();

        assert_eq!(state.records[0].signature, "Fresh");
        let shown = view.shown.lock().unwrap();
        assert!(shown[0].loading);
        assert!(!shown[1].loading);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_records() {
        let view = Arc::new(RecordingView::default());
        let presenter =
            HistoryPresenterImpl::new(Arc::new(FakeInteractor { fail: true }), view.clone());

        let state = presenter.show_history(Some(shown_before())).await.unwrap();

        assert_eq!(state.records[0].signature, "Old");
        assert!(state.error.unwrap().contains("rpc down"));
    }

    #[tokio::test]
    async fn failed_first_load_is_empty() {
        let view = Arc::new(RecordingView::default());
        let presenter =
            HistoryPresenterImpl::new(Arc::new(FakeInteractor { fail: true }), view);

        let state = presenter.show_history(None).await.unwrap();

        assert!(state.records.is_empty());
        assert!(state.error.is_some());
    }
}
