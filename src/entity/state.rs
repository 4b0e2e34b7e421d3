use crate::entity::Asset;

/// Dialogue state of a chat. Each variant is one pending form input.
#[derive(Clone, Default, Debug)]
pub enum State {
    #[default]
    Start,
    AwaitingRecipientAddress,
    AwaitingAmount {
        recipient: String,
    },
    AwaitingConfirmation {
        recipient: String,
        amount: String,
        asset: Asset,
    },
    AwaitingRequestAmount {
        asset: Asset,
    },
}
