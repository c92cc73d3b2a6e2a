//! # Workspace
//!
//! Reads `Anchor.toml` to find deployed program ids per cluster and the
//! default provider.
//!
//! ```toml
//! [provider]
//! cluster = "Localnet"
//! wallet = "~/.config/solana/id.json"
//!
//! [programs.localnet]
//! music3_program = "HmHG2JRTAVdsBZ6hibDaL9Px1q6afidMhL1E9QfJzUzd"
//! ```

use crate::cluster::Cluster;
use crate::error::{Error, Result};
use crate::program::Program;
use crate::provider::Provider;
use serde::Deserialize;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Workspace file name
pub const WORKSPACE_FILE: &str = "Anchor.toml";

/// `[provider]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Cluster name or URL
    pub cluster: String,
    /// Keypair path, `~` is expanded
    pub wallet: String,
}

/// A `[programs.<cluster>]` entry: either the address or a table holding it
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ProgramEntry {
    /// `name = "<address>"`
    Address(String),
    /// `name = { address = "<address>", ... }`
    Detailed {
        /// Program address
        address: String,
    },
}

impl ProgramEntry {
    fn address(&self) -> &str {
        match self {
            ProgramEntry::Address(address) | ProgramEntry::Detailed { address } => address,
        }
    }
}

/// Parsed workspace file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkspaceConfig {
    /// Default provider
    #[serde(default)]
    pub provider: Option<ProviderConfig>,
    /// cluster section -> program name -> entry
    #[serde(default)]
    pub programs: BTreeMap<String, BTreeMap<String, ProgramEntry>>,
}

/// Workspace rooted at the directory holding `Anchor.toml`
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: WorkspaceConfig,
}

impl Workspace {
    /// Search `start` and its ancestors for the workspace file
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let start = start.as_ref();
        for dir in start.ancestors() {
            let candidate = dir.join(WORKSPACE_FILE);
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }
        Err(Error::WorkspaceNotFound(start.to_path_buf()))
    }

    /// Load a specific workspace file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        debug!(path = %path.display(), "loaded workspace");
        Self::parse(root, &contents)
    }

    /// Parse workspace contents
    pub fn parse(root: PathBuf, contents: &str) -> Result<Self> {
        let config: WorkspaceConfig = toml::from_str(contents)?;
        Ok(Self { root, config })
    }

    /// Directory holding the workspace file
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parsed configuration
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Provider from the `[provider]` section
    pub fn provider(&self) -> Result<Provider> {
        let provider = self.config.provider.as_ref().ok_or(Error::NoProvider)?;
        let cluster = Cluster::from_str(&provider.cluster)?;
        Provider::connect(
            cluster,
            expand_home(&provider.wallet),
            CommitmentConfig::confirmed(),
        )
    }

    /// Program id deployed under `name` on `cluster`
    pub fn program_id(&self, cluster: &Cluster, name: &str) -> Result<Pubkey> {
        let section = cluster.programs_section();
        let wanted = normalize_name(name);
        let entry = self
            .config
            .programs
            .get(section)
            .and_then(|programs| {
                programs
                    .iter()
                    .find(|(key, _)| normalize_name(key) == wanted)
                    .map(|(_, entry)| entry)
            })
            .ok_or_else(|| Error::ProgramNotFound {
                name: wanted.clone(),
                cluster: section.to_string(),
            })?;
        Pubkey::from_str(entry.address()).map_err(|_| Error::InvalidProgramId {
            name: wanted,
            value: entry.address().to_string(),
        })
    }

    /// Typed handle to the program deployed under `name` on the provider's cluster
    pub fn program(&self, provider: &Provider, name: &str) -> Result<Program> {
        let id = self.program_id(provider.cluster(), name)?;
        Ok(Program::new(id, provider.clone()))
    }
}

/// `Music3Program`, `music3-program` and `music3_program` all become
/// `music3_program`.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.trim().chars().enumerate() {
        if c == '-' || c == ' ' {
            out.push('_');
        } else if c.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "HmHG2JRTAVdsBZ6hibDaL9Px1q6afidMhL1E9QfJzUzd";

    fn workspace() -> Workspace {
        Workspace::parse(
            PathBuf::from("/tmp"),
            &format!(
                r#"
[provider]
cluster = "Localnet"
wallet = "~/.config/solana/id.json"

[programs.localnet]
music3_program = "{ID}"

[programs.devnet]
music3_program = {{ address = "{ID}", idl = "target/idl/music3_program.json" }}
broken = "not-a-key"
"#
            ),
        )
        .unwrap()
    }

    #[test]
    fn names_normalize() {
        assert_eq!(normalize_name("Music3Program"), "music3_program");
        assert_eq!(normalize_name("music3-program"), "music3_program");
        assert_eq!(normalize_name("music3_program"), "music3_program");
        assert_eq!(normalize_name("Music3Contract"), "music3_contract");
    }

    #[test]
    fn resolves_program_per_cluster() {
        let ws = workspace();
        let id = Pubkey::from_str(ID).unwrap();
        assert_eq!(ws.program_id(&Cluster::Localnet, "Music3Program").unwrap(), id);
        assert_eq!(ws.program_id(&Cluster::Devnet, "music3-program").unwrap(), id);

        let custom: Cluster = "http://10.0.0.2:8899".parse().unwrap();
        assert_eq!(ws.program_id(&custom, "music3_program").unwrap(), id);
    }

    #[test]
    fn unknown_and_invalid_programs() {
        let ws = workspace();
        assert!(matches!(
            ws.program_id(&Cluster::Mainnet, "music3_program"),
            Err(Error::ProgramNotFound { .. })
        ));
        assert!(matches!(
            ws.program_id(&Cluster::Localnet, "other"),
            Err(Error::ProgramNotFound { .. })
        ));
        assert!(matches!(
            ws.program_id(&Cluster::Devnet, "broken"),
            Err(Error::InvalidProgramId { .. })
        ));
    }

    #[test]
    fn provider_section_is_parsed() {
        let ws = workspace();
        let provider = ws.config().provider.as_ref().unwrap();
        assert_eq!(provider.cluster, "Localnet");
        assert!(expand_home(&provider.wallet).ends_with(".config/solana/id.json"));
    }

    #[test]
    fn provider_section_connects_with_its_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = dir.path().join("id.json");
        let keypair = solana_sdk::signature::Keypair::new();
        solana_sdk::signature::write_keypair_file(&keypair, &wallet).unwrap();

        let ws = Workspace::parse(
            dir.path().to_path_buf(),
            &format!(
                "[provider]\ncluster = \"Devnet\"\nwallet = {:?}\n",
                wallet.display().to_string()
            ),
        )
        .unwrap();
        let provider = ws.provider().unwrap();
        assert_eq!(provider.cluster(), &Cluster::Devnet);
        assert_eq!(
            provider.payer_pubkey(),
            solana_sdk::signature::Signer::pubkey(&keypair)
        );

        let broken = Workspace::parse(
            dir.path().to_path_buf(),
            "[provider]\ncluster = \"Localnet\"\nwallet = \"/nonexistent/id.json\"\n",
        )
        .unwrap();
        assert!(matches!(broken.provider(), Err(Error::Keypair { .. })));
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(WORKSPACE_FILE);
        let err = Workspace::load(&path).unwrap_err();
        assert!(matches!(&err, Error::Io { path: p, .. } if p == &path));
        assert!(err.to_string().contains(&path.display().to_string()), "{err}");
    }

    #[test]
    fn discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(WORKSPACE_FILE),
            format!("[programs.localnet]\nmusic3_program = \"{ID}\"\n"),
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let ws = Workspace::discover(&nested).unwrap();
        assert_eq!(ws.root(), dir.path());
        assert!(ws.config().provider.is_none());
        assert!(matches!(ws.provider(), Err(Error::NoProvider)));
    }
}
