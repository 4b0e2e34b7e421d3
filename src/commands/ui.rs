use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Main menu. Wallet actions are only offered while a wallet is connected.
pub fn create_wallet_menu_keyboard(connected: bool) -> InlineKeyboardMarkup {
    if !connected {
        return InlineKeyboardMarkup::new(vec![vec![
            InlineKeyboardButton::callback("🔌 Connect wallet", "connect"),
            InlineKeyboardButton::callback("Help", "help"),
        ]]);
    }

    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("Send", "send"),
            InlineKeyboardButton::callback("Request USDC", "request_usdc"),
            InlineKeyboardButton::callback("Request SOL", "request_sol"),
        ],
        vec![
            InlineKeyboardButton::callback("History", "history"),
            InlineKeyboardButton::callback("View Address", "address"),
            InlineKeyboardButton::callback("🔄 Refresh", "refresh"),
        ],
        vec![
            InlineKeyboardButton::callback("Help", "help"),
            InlineKeyboardButton::callback("Disconnect", "disconnect"),
        ],
    ])
}
