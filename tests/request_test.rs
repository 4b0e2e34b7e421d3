mod common;

use common::{connected_wallet, FakeChain};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::sync::Arc;
use usdc_wallet_bot::interactor::request_interactor::{
    ReceivePreparation, RequestInteractor, RequestInteractorImpl,
};
use usdc_wallet_bot::solana::token_account_address;
use usdc_wallet_bot::{Asset, KeypairWallet, WalletAdapter, WalletError};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[tokio::test]
async fn usdc_request_carries_token_and_creates_account() {
    let wallet = connected_wallet().await;
    let owner = wallet.public_key().unwrap();
    let mint = Pubkey::new_unique();
    let chain = Arc::new(FakeChain::new(6));
    let interactor = RequestInteractorImpl::new(chain.clone(), wallet, mint);

    let request = interactor
        .create_payment_request(" 5 ", Asset::Usdc)
        .await
        .unwrap();

    assert_eq!(
        request.uri,
        format!("solana:{}?amount=5&token={}", owner, mint)
    );
    assert_eq!(&request.qr_png[..8], &PNG_SIGNATURE);
    assert!(matches!(
        request.preparation,
        ReceivePreparation::AccountCreated(_)
    ));
    assert_eq!(chain.sent_transactions().len(), 1);
}

#[tokio::test]
async fn usdc_request_with_existing_account_sends_nothing() {
    let wallet = connected_wallet().await;
    let owner = wallet.public_key().unwrap();
    let mint = Pubkey::new_unique();
    let chain =
        Arc::new(FakeChain::new(6).with_token_account(token_account_address(&owner, &mint), 0));
    let interactor = RequestInteractorImpl::new(chain.clone(), wallet, mint);

    let request = interactor
        .create_payment_request("2.5", Asset::Usdc)
        .await
        .unwrap();

    assert_eq!(request.preparation, ReceivePreparation::Ready);
    assert!(chain.sent_transactions().is_empty());
}

#[tokio::test]
async fn sol_request_omits_token_and_touches_no_network() {
    let wallet = connected_wallet().await;
    let owner = wallet.public_key().unwrap();
    let chain = Arc::new(FakeChain::new(6));
    let interactor = RequestInteractorImpl::new(chain.clone(), wallet, Pubkey::new_unique());

    let request = interactor
        .create_payment_request("0.25", Asset::Sol)
        .await
        .unwrap();

    assert_eq!(request.uri, format!("solana:{}?amount=0.25", owner));
    assert_eq!(request.preparation, ReceivePreparation::Ready);
    assert_eq!(chain.calls(), 0);
}

#[tokio::test]
async fn account_preparation_failure_does_not_block_the_request() {
    let mut chain = FakeChain::new(6);
    chain.decimals = None;
    let interactor =
        RequestInteractorImpl::new(Arc::new(chain), connected_wallet().await, Pubkey::new_unique());

    let request = interactor
        .create_payment_request("1", Asset::Usdc)
        .await
        .unwrap();

    assert!(matches!(request.preparation, ReceivePreparation::Failed(_)));
    assert!(request.uri.contains("&token="));
}

#[tokio::test]
async fn invalid_amount_or_disconnected_wallet_is_rejected() {
    let chain = Arc::new(FakeChain::new(6));
    let connected = RequestInteractorImpl::new(
        chain.clone(),
        connected_wallet().await,
        Pubkey::new_unique(),
    );

    let error = connected
        .create_payment_request("0", Asset::Usdc)
        .await
        .err()
        .unwrap();
    assert!(matches!(
        error.downcast_ref::<WalletError>(),
        Some(WalletError::InvalidAmount)
    ));

    let disconnected = RequestInteractorImpl::new(
        chain.clone(),
        Arc::new(KeypairWallet::new(Keypair::new())),
        Pubkey::new_unique(),
    );
    let error = disconnected
        .create_payment_request("1", Asset::Usdc)
        .await
        .err()
        .unwrap();
    assert!(matches!(
        error.downcast_ref::<WalletError>(),
        Some(WalletError::WalletNotConnected)
    ));

    assert_eq!(chain.calls(), 0);
}
