//! Client side of music3: resolve the deployed program, call its methods and
//! talk to the backend.
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use music3_client::{Provider, Workspace};
//!
//! let provider = Provider::env()?;
//! let workspace = Workspace::discover(std::env::current_dir()?)?;
//! let program = workspace.program(&provider, "Music3Program")?;
//! let tx = program.methods().initialize().rpc().await?;
//! println!("Your transaction signature {tx}");
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code, missing_docs, clippy::unwrap_used)]

pub mod api;
pub mod cluster;
pub mod error;
pub mod logging;
pub mod program;
pub mod provider;
pub mod subscribe;
pub mod transport;
pub mod workspace;

pub use api::ApiClient;
pub use cluster::Cluster;
pub use program::{sighash, Program};
pub use provider::Provider;
pub use subscribe::AccountWatcher;
pub use transport::Transport;
pub use workspace::Workspace;
