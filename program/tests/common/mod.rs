#![allow(dead_code)]

use async_trait::async_trait;
use music3_client::{error::Error as ClientError, Cluster, Program, Provider, Transport};
use solana_program_test::{BanksClientError, ProgramTest};
use std::sync::{Arc, Mutex};
use std::{env, path::Path};

pub use solana_program_test::{BanksClient, ProgramTestContext};
pub use solana_sdk::{
    account::Account,
    hash::Hash,
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::{Transaction, TransactionError},
};

pub fn program_id() -> Pubkey {
    Pubkey::new_from_array(music3_program::ID)
}

pub fn program_test() -> ProgramTest {
    let deploy_dir = format!("{}/target/deploy", env!("CARGO_MANIFEST_DIR"));
    env::set_var("BPF_OUT_DIR", &deploy_dir);
    let so_path = Path::new(&deploy_dir).join("music3_program.so");
    assert!(
        so_path.exists(),
        "SBF artifact not found at {}.\nBuild first: `cargo-build-sbf --no-default-features --features sbf --manifest-path program/Cargo.toml --sbf-out-dir program/target/deploy`",
        so_path.display()
    );

    let mut pt = ProgramTest::default();
    pt.prefer_bpf(true);
    pt.add_upgradeable_program_to_genesis("music3_program", &program_id());
    pt
}

/// Lands transactions in the in-process bank.
pub struct BanksTransport {
    client: Mutex<BanksClient>,
}

impl BanksTransport {
    pub fn new(client: BanksClient) -> Self {
        Self {
            client: Mutex::new(client),
        }
    }

    fn client(&self) -> BanksClient {
        self.client.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for BanksTransport {
    async fn latest_blockhash(&self) -> music3_client::error::Result<Hash> {
        let mut client = self.client();
        client.get_latest_blockhash().await.map_err(banks_error)
    }

    async fn send_and_confirm(
        &self,
        transaction: &Transaction,
    ) -> music3_client::error::Result<Signature> {
        let mut client = self.client();
        client
            .process_transaction(transaction.clone())
            .await
            .map_err(banks_error)?;
        Ok(transaction.signatures[0])
    }

    async fn get_account(&self, pubkey: &Pubkey) -> music3_client::error::Result<Option<Account>> {
        let mut client = self.client();
        client.get_account(*pubkey).await.map_err(banks_error)
    }
}

fn banks_error(err: BanksClientError) -> ClientError {
    match err {
        BanksClientError::TransactionError(err)
        | BanksClientError::SimulationError { err, .. } => ClientError::Transaction(err),
        other => ClientError::Rpc(other.to_string()),
    }
}

/// Provider over the bank, paying with the context payer.
pub fn provider(ctx: &ProgramTestContext) -> Provider {
    Provider::new(
        Cluster::Localnet,
        ctx.payer.insecure_clone(),
        Arc::new(BanksTransport::new(ctx.banks_client.clone())),
    )
}

/// Handle to the deployed music3 program.
pub fn music3(ctx: &ProgramTestContext) -> Program {
    Program::new(program_id(), provider(ctx))
}

pub fn custom_error(err: &ClientError) -> Option<u32> {
    match err {
        ClientError::Transaction(TransactionError::InstructionError(
            _,
            InstructionError::Custom(code),
        )) => Some(*code),
        _ => None,
    }
}

/// Process `ix` and return the program logs.
pub async fn logs_of(ctx: &mut ProgramTestContext, ix: Instruction) -> Vec<String> {
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&ctx.payer.pubkey()),
        &[&ctx.payer],
        ctx.last_blockhash,
    );
    let result = ctx
        .banks_client
        .process_transaction_with_metadata(tx)
        .await
        .unwrap();
    assert!(result.result.is_ok(), "transaction failed: {:?}", result.result);
    result.metadata.expect("metadata").log_messages
}
