use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use qrcode::{render::svg, QrCode};
use regex::Regex;
use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::entity::{Asset, WalletError};
use crate::solana::tokens::constants::EXPLORER_TX_URL;

// Generate QR code for an arbitrary payload (address or payment request URI)
pub fn generate_qr_code(payload: &str) -> Result<Vec<u8>> {
    // Create QR code with high error correction
    let code = QrCode::with_error_correction_level(payload, qrcode::EcLevel::H)
        .map_err(|e| anyhow!("Failed to generate QR code: {}", e))?;

    let svg_string = code
        .render()
        .min_dimensions(200, 200)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(svg_string.into_bytes())
}

// Validate Solana address
pub fn validate_solana_address(address: &str) -> bool {
    Pubkey::from_str(address.trim()).is_ok()
}

/// Parses a strictly positive decimal amount.
pub fn parse_amount(input: &str) -> Result<Decimal, WalletError> {
    match Decimal::from_str(input.trim()) {
        Ok(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(WalletError::InvalidAmount),
    }
}

/// Parses "2.5" (defaults to USDC) or "0.1 SOL" style input.
pub fn parse_amount_and_asset(input: &str) -> Result<(String, Asset), WalletError> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^(\S+)(?:\s+([A-Za-z]+))?$").unwrap();
    }

    let captures = RE.captures(input.trim()).ok_or(WalletError::InvalidAmount)?;
    let amount = captures
        .get(1)
        .map(|m| m.as_str())
        .ok_or(WalletError::InvalidAmount)?;

    let asset = match captures.get(2) {
        Some(symbol) => Asset::from_symbol(symbol.as_str()).ok_or(WalletError::InvalidAmount)?,
        None => Asset::default(),
    };

    parse_amount(amount)?;

    Ok((amount.to_string(), asset))
}

/// Checks transfer input in a fixed order: recipient present, amount
/// positive, recipient a valid address. Makes no network calls.
pub fn validate_transfer(recipient: &str, amount: &str) -> Result<(Pubkey, Decimal), WalletError> {
    let recipient = recipient.trim();
    if recipient.is_empty() {
        return Err(WalletError::EmptyRecipient);
    }

    let amount = parse_amount(amount)?;

    let recipient = Pubkey::from_str(recipient).map_err(|_| WalletError::InvalidRecipient)?;

    Ok((recipient, amount))
}

/// Payment request URI: `scheme:<address>?amount=<amount>[&token=<mint>]`.
pub fn payment_request_uri(scheme: &str, address: &str, amount: &str, token: Option<&str>) -> String {
    match token {
        Some(token) => format!("{}:{}?amount={}&token={}", scheme, address, amount, token),
        None => format!("{}:{}?amount={}", scheme, address, amount),
    }
}

/// Block explorer link for a transaction signature.
pub fn explorer_tx_url(signature: &str, cluster: &str) -> String {
    if cluster.is_empty() || cluster == "mainnet-beta" {
        format!("{}/{}", EXPLORER_TX_URL, signature)
    } else {
        format!("{}/{}?cluster={}", EXPLORER_TX_URL, signature, cluster)
    }
}

// Format amount with appropriate precision
pub fn format_amount(amount: Decimal, asset: Asset) -> String {
    match asset {
        Asset::Sol => format!("{:.9}", amount),
        Asset::Usdc => format!("{:.6}", amount),
    }
}

// Shorten address for display
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }

    let start: String = chars[..4].iter().collect();
    let end: String = chars[chars.len() - 4..].iter().collect();

    format!("{}...{}", start, end)
}

pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(time) => time.format("%b %-d, %H:%M UTC").to_string(),
        None => "Unknown time".to_string(),
    }
}

// Escape text placed into HTML formatted messages
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
