pub mod balance_view;
pub mod history_view;
pub mod request_view;
pub mod send_view;
pub mod wallet_view;
