use serde::{Deserialize, Serialize};

/// What a transfer or payment request moves: native SOL or the configured USDC mint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Asset {
    Sol,
    #[default]
    Usdc,
}

impl Asset {
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Sol => "SOL",
            Asset::Usdc => "USDC",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.to_uppercase().as_str() {
            "SOL" => Some(Asset::Sol),
            "USDC" => Some(Asset::Usdc),
            _ => None,
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
