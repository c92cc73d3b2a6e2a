//! # Program handle
//!
//! `program.methods().initialize().rpc().await` builds the instruction for a
//! method, signs it through the provider and waits for confirmation.

use crate::error::Result;
use crate::provider::Provider;
use sha2::{Digest, Sha256};
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use tracing::info;

/// Length of the method selector
pub const DISCRIMINATOR_LEN: usize = 8;

/// Method selector: `sha256("global:<method>")[..8]`
pub fn sighash(method: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("global:{method}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

/// Typed handle to a deployed program
#[derive(Debug, Clone)]
pub struct Program {
    id: Pubkey,
    provider: Provider,
}

impl Program {
    /// Handle for the program at `id`
    pub fn new(id: Pubkey, provider: Provider) -> Self {
        Self { id, provider }
    }

    /// Program id
    pub fn id(&self) -> Pubkey {
        self.id
    }

    /// Provider the handle signs with
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// The program's methods
    pub fn methods(&self) -> Methods<'_> {
        Methods { program: self }
    }

    /// Request for a method by name
    pub fn request(&self, method: impl Into<String>) -> RequestBuilder<'_> {
        RequestBuilder {
            program: self,
            method: method.into(),
            args: Vec::new(),
            accounts: Vec::new(),
            signers: Vec::new(),
        }
    }
}

/// Methods exposed by the music3 program
#[derive(Debug, Clone, Copy)]
pub struct Methods<'a> {
    program: &'a Program,
}

impl<'a> Methods<'a> {
    /// `initialize()`; takes no arguments and no accounts
    pub fn initialize(self) -> RequestBuilder<'a> {
        self.program.request("initialize")
    }

    /// `create_candy_machine()`; takes no arguments and no accounts
    pub fn create_candy_machine(self) -> RequestBuilder<'a> {
        self.program.request("create_candy_machine")
    }
}

/// A single method call being assembled
pub struct RequestBuilder<'a> {
    program: &'a Program,
    method: String,
    args: Vec<u8>,
    accounts: Vec<AccountMeta>,
    signers: Vec<&'a Keypair>,
}

impl<'a> RequestBuilder<'a> {
    /// Append account metas
    pub fn accounts(mut self, accounts: impl IntoIterator<Item = AccountMeta>) -> Self {
        self.accounts.extend(accounts);
        self
    }

    /// Append serialized argument bytes after the discriminator
    pub fn args(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.args.extend_from_slice(bytes.as_ref());
        self
    }

    /// Extra signer besides the provider's payer
    pub fn signer(mut self, signer: &'a Keypair) -> Self {
        self.signers.push(signer);
        self
    }

    /// Method name
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Render the instruction
    pub fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(DISCRIMINATOR_LEN + self.args.len());
        data.extend_from_slice(&sighash(&self.method));
        data.extend_from_slice(&self.args);
        Instruction {
            program_id: self.program.id,
            accounts: self.accounts.clone(),
            data,
        }
    }

    /// Send the call and wait for confirmation
    pub async fn rpc(self) -> Result<Signature> {
        let ix = self.instruction();
        let signature = self
            .program
            .provider
            .send_and_confirm(&[ix], &self.signers)
            .await?;
        info!(method = %self.method, program = %self.program.id, %signature, "confirmed");
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Cluster;
    use crate::transport::Transport;
    use async_trait::async_trait;
    use solana_sdk::account::Account;
    use solana_sdk::hash::Hash;
    use solana_sdk::signer::Signer;
    use solana_sdk::transaction::Transaction;
    use std::sync::{Arc, Mutex};

    #[test]
    fn initialize_selector() {
        assert_eq!(sighash("initialize"), [175, 175, 109, 31, 13, 152, 155, 237]);
        assert_eq!(
            sighash("create_candy_machine"),
            [84, 112, 91, 6, 68, 170, 92, 225]
        );
    }

    struct Capture(Mutex<Option<Transaction>>);

    #[async_trait]
    impl Transport for Capture {
        async fn latest_blockhash(&self) -> Result<Hash> {
            Ok(Hash::default())
        }

        async fn send_and_confirm(&self, transaction: &Transaction) -> Result<Signature> {
            *self.0.lock().unwrap() = Some(transaction.clone());
            Ok(transaction.signatures[0])
        }

        async fn get_account(&self, _: &Pubkey) -> Result<Option<Account>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn initialize_sends_bare_selector() {
        let capture = Arc::new(Capture(Mutex::new(None)));
        let provider = Provider::new(Cluster::Localnet, Keypair::new(), capture.clone());
        let program = Program::new(Pubkey::new_unique(), provider);

        let signature = program.methods().initialize().rpc().await.unwrap();
        assert_ne!(signature, Signature::default());

        let tx = capture.0.lock().unwrap().take().unwrap();
        let ix = &tx.message.instructions[0];
        assert_eq!(ix.data, sighash("initialize"));
        assert!(ix.accounts.is_empty());
        assert_eq!(
            tx.message.account_keys[ix.program_id_index as usize],
            program.id()
        );
    }

    #[test]
    fn builder_appends_args_and_accounts() {
        let provider = Provider::new(
            Cluster::Localnet,
            Keypair::new(),
            Arc::new(Capture(Mutex::new(None))),
        );
        let program = Program::new(Pubkey::new_unique(), provider);
        let extra = Keypair::new();
        let ix = program
            .request("create_candy_machine")
            .accounts([AccountMeta::new(extra.pubkey(), true)])
            .args([7u8, 8])
            .signer(&extra)
            .instruction();
        assert_eq!(&ix.data[..8], &sighash("create_candy_machine"));
        assert_eq!(&ix.data[8..], &[7u8, 8]);
        assert_eq!(ix.accounts.len(), 1);
    }
}
