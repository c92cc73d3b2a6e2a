//! # Provider
//!
//! Signing context for every call: which cluster, who pays, and how
//! transactions reach it.

use crate::cluster::Cluster;
use crate::error::{Error, Result};
use crate::transport::Transport;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Cluster URL the environment provider connects to
pub const PROVIDER_URL_ENV: &str = "ANCHOR_PROVIDER_URL";
/// Path of the payer keypair file
pub const WALLET_ENV: &str = "ANCHOR_WALLET";

/// Environment-configured client context used to sign and submit calls
#[derive(Clone)]
pub struct Provider {
    cluster: Cluster,
    payer: Arc<Keypair>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("cluster", &self.cluster)
            .field("payer", &self.payer.pubkey())
            .finish_non_exhaustive()
    }
}

impl Provider {
    /// Create a provider over an existing transport
    pub fn new(cluster: Cluster, payer: Keypair, transport: Arc<dyn Transport>) -> Self {
        Self {
            cluster,
            payer: Arc::new(payer),
            transport,
        }
    }

    /// Provider described by `ANCHOR_PROVIDER_URL` and `ANCHOR_WALLET`
    pub fn env() -> Result<Self> {
        let url = env_var(PROVIDER_URL_ENV)?;
        let wallet = env_var(WALLET_ENV)?;
        Self::connect(url.parse()?, wallet, CommitmentConfig::confirmed())
    }

    /// [`Provider::env`], or `fallback` with the name of the first missing
    /// variable when the environment does not describe a provider.
    pub fn env_or_else(fallback: impl FnOnce(&'static str) -> Result<Self>) -> Result<Self> {
        match Self::env() {
            Err(Error::MissingEnv(name)) => {
                debug!(missing = name, "environment names no provider");
                fallback(name)
            }
            other => other,
        }
    }

    /// Connect to `cluster` over RPC, paying with the keypair stored at `wallet`
    pub fn connect(
        cluster: Cluster,
        wallet: impl AsRef<Path>,
        commitment: CommitmentConfig,
    ) -> Result<Self> {
        let payer = read_keypair(wallet.as_ref())?;
        let rpc = RpcClient::new_with_commitment(cluster.url().to_string(), commitment);
        debug!(%cluster, payer = %payer.pubkey(), "connected provider");
        Ok(Self::new(cluster, payer, Arc::new(rpc)))
    }

    /// Cluster
    pub fn cluster(&self) -> &Cluster {
        &self.cluster
    }

    /// Fee payer and default signer
    pub fn payer(&self) -> &Keypair {
        &self.payer
    }

    /// Fee payer public key
    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// Underlying transport
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Account stored at `pubkey`
    pub async fn account(&self, pubkey: &Pubkey) -> Result<Account> {
        let account = self.transport.get_account(pubkey).await?;
        account.ok_or(Error::AccountNotFound(*pubkey))
    }

    /// Sign `instructions` with the payer plus `signers`, submit, and wait for
    /// confirmation.
    pub async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        signers: &[&Keypair],
    ) -> Result<Signature> {
        let blockhash = self.transport.latest_blockhash().await?;

        let mut keys: Vec<&dyn Signer> = Vec::with_capacity(signers.len() + 1);
        keys.push(&*self.payer);
        for signer in signers {
            if signer.pubkey() != self.payer.pubkey() {
                keys.push(*signer);
            }
        }

        let message = Message::new(instructions, Some(&self.payer.pubkey()));
        let mut tx = Transaction::new_unsigned(message);
        tx.try_sign(&keys, blockhash)?;

        let signature = self.transport.send_and_confirm(&tx).await?;
        debug!(%signature, instructions = instructions.len(), "transaction confirmed");
        Ok(signature)
    }
}

fn env_var(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MissingEnv(name)),
    }
}

/// Read a JSON keypair file
pub fn read_keypair(path: &Path) -> Result<Keypair> {
    read_keypair_file(path).map_err(|err| Error::Keypair {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
