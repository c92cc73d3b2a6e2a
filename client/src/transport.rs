//! # Transport
//!
//! The part of a cluster connection the provider needs: a recent blockhash, a
//! way to land a signed transaction and account reads.

use crate::error::{Error, Result};
use async_trait::async_trait;
use solana_client::client_error::ClientError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

/// Submits transactions to a cluster
#[async_trait]
pub trait Transport: Send + Sync {
    /// Blockhash to sign new transactions against
    async fn latest_blockhash(&self) -> Result<Hash>;

    /// Submit a signed transaction and wait until it is confirmed
    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature>;

    /// Current state of `pubkey`, `None` when nothing lives there
    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>>;
}

#[async_trait]
impl Transport for RpcClient {
    async fn latest_blockhash(&self) -> Result<Hash> {
        self.get_latest_blockhash().await.map_err(client_error)
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature> {
        self.send_and_confirm_transaction(transaction)
            .await
            .map_err(client_error)
    }

    async fn get_account(&self, pubkey: &Pubkey) -> Result<Option<Account>> {
        let response = self
            .get_account_with_commitment(pubkey, self.commitment())
            .await
            .map_err(client_error)?;
        Ok(response.value)
    }
}

fn client_error(err: ClientError) -> Error {
    match err.get_transaction_error() {
        Some(tx_err) => Error::Transaction(tx_err),
        None => Error::Rpc(err.to_string()),
    }
}
