use crate::entity::{Asset, TokenAccountState, WalletError};
use crate::qrcodeutils;
use crate::solana::tokens::constants::PAYMENT_URI_SCHEME;
use crate::solana::{self, ChainRpc, WalletAdapter};
use crate::utils;
use anyhow::Result;
use async_trait::async_trait;
use log::warn;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

/// Outcome of making the wallet ready to receive the requested token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceivePreparation {
    /// Nothing to do: native SOL, or the token account already exists.
    Ready,
    /// The token account was created by this request.
    AccountCreated(String),
    /// Creating the token account failed; the request is still shown.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub uri: String,
    pub qr_png: Vec<u8>,
    pub amount: String,
    pub asset: Asset,
    pub preparation: ReceivePreparation,
}

#[async_trait]
pub trait RequestInteractor: Send + Sync {
    fn is_wallet_connected(&self) -> bool;
    async fn create_payment_request(&self, amount_text: &str, asset: Asset)
        -> Result<PaymentRequest>;
}

pub struct RequestInteractorImpl {
    solana_client: Arc<dyn ChainRpc>,
    wallet: Arc<dyn WalletAdapter>,
    usdc_mint: Pubkey,
}

impl RequestInteractorImpl {
    pub fn new(
        solana_client: Arc<dyn ChainRpc>,
        wallet: Arc<dyn WalletAdapter>,
        usdc_mint: Pubkey,
    ) -> Self {
        Self {
            solana_client,
            wallet,
            usdc_mint,
        }
    }

    async fn prepare(&self, owner: &Pubkey, asset: Asset) -> ReceivePreparation {
        if asset == Asset::Sol {
            return ReceivePreparation::Ready;
        }

        match solana::prepare_to_receive(
            self.solana_client.as_ref(),
            self.wallet.as_ref(),
            owner,
            &self.usdc_mint,
            asset.symbol(),
        )
        .await
        {
            Ok(balance) => match balance.account {
                TokenAccountState::Created(signature) => {
                    ReceivePreparation::AccountCreated(signature)
                }
                _ => ReceivePreparation::Ready,
            },
            Err(e) => {
                warn!("Could not prepare {} token account: {}", asset, e);
                ReceivePreparation::Failed(e.to_string())
            }
        }
    }
}

#[async_trait]
impl RequestInteractor for RequestInteractorImpl {
    fn is_wallet_connected(&self) -> bool {
        self.wallet.public_key().is_some()
    }

    async fn create_payment_request(
        &self,
        amount_text: &str,
        asset: Asset,
    ) -> Result<PaymentRequest> {
        utils::parse_amount(amount_text)?;
        let amount = amount_text.trim().to_string();

        let owner = self
            .wallet
            .public_key()
            .ok_or(WalletError::WalletNotConnected)?;

        let preparation = self.prepare(&owner, asset).await;

        let mint = self.usdc_mint.to_string();
        let token = match asset {
            Asset::Sol => None,
            Asset::Usdc => Some(mint.as_str()),
        };
        let uri = utils::payment_request_uri(PAYMENT_URI_SCHEME, &owner.to_string(), &amount, token);
        let qr_png = qrcodeutils::render_qr_png(&uri)?;

        Ok(PaymentRequest {
            uri,
            qr_png,
            amount,
            asset,
            preparation,
        })
    }
}
