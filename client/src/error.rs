//! Client errors.

use solana_sdk::signer::SignerError;
use solana_sdk::transaction::TransactionError;
use std::path::PathBuf;

/// Error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required environment variable is absent
    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),
    /// Keypair file could not be read
    #[error("Failed to read keypair from {path}: {message}")]
    Keypair {
        /// Keypair file
        path: PathBuf,
        /// Underlying reason
        message: String,
    },
    /// Cluster name or URL is not understood
    #[error("Invalid cluster: {0}")]
    InvalidCluster(String),
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// Workspace file is malformed
    #[error("Failed to parse workspace config: {0}")]
    Toml(#[from] toml::de::Error),
    /// No workspace file above the start directory
    #[error("No Anchor.toml found in {0} or any parent directory")]
    WorkspaceNotFound(PathBuf),
    /// Workspace has no provider section
    #[error("Workspace has no [provider] section")]
    NoProvider,
    /// Program name not listed for the cluster
    #[error("Program {name} is not listed under [programs.{cluster}]")]
    ProgramNotFound {
        /// Normalized program name
        name: String,
        /// Cluster section that was searched
        cluster: String,
    },
    /// Program id in the workspace is not a valid pubkey
    #[error("Invalid program id for {name}: {value}")]
    InvalidProgramId {
        /// Program name
        name: String,
        /// Offending value
        value: String,
    },
    /// Transaction could not be signed
    #[error("Failed to sign transaction: {0}")]
    Signer(#[from] SignerError),
    /// Transaction reached the cluster and failed
    #[error("Transaction failed: {0}")]
    Transaction(#[from] TransactionError),
    /// Nothing is stored at the address
    #[error("Account {0} not found")]
    AccountNotFound(solana_sdk::pubkey::Pubkey),
    /// Websocket subscription failed
    #[error("Subscription error: {0}")]
    Subscription(String),
    /// Transport level failure
    #[error("RPC error: {0}")]
    Rpc(String),
    /// Backend answered with an error status
    #[error("backend replied {status}: {body}")]
    Status {
        /// HTTP status
        status: reqwest::StatusCode,
        /// Response body, usually the reason
        body: String,
    },
    /// Backend address is not a URL
    #[error("bad backend URL: {0}")]
    Url(#[from] url::ParseError),
    /// Request never completed or the body did not decode
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;
