//! # Cluster
//!
//! Where transactions are sent. Known clusters are recognised by name or by
//! their public RPC URL; anything else is kept as a custom endpoint.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use url::Url;

const LOCALNET_URL: &str = "http://127.0.0.1:8899";
const LOCALNET_WS: &str = "ws://127.0.0.1:8900";
const DEVNET_URL: &str = "https://api.devnet.solana.com";
const DEVNET_WS: &str = "wss://api.devnet.solana.com";
const TESTNET_URL: &str = "https://api.testnet.solana.com";
const TESTNET_WS: &str = "wss://api.testnet.solana.com";
const MAINNET_URL: &str = "https://api.mainnet-beta.solana.com";
const MAINNET_WS: &str = "wss://api.mainnet-beta.solana.com";

/// Target cluster
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cluster {
    /// Local test validator
    #[default]
    Localnet,
    /// Devnet
    Devnet,
    /// Testnet
    Testnet,
    /// Mainnet beta
    Mainnet,
    /// Any other endpoint
    Custom {
        /// HTTP RPC endpoint
        url: String,
        /// Websocket endpoint
        ws_url: String,
    },
}

impl Cluster {
    /// HTTP RPC endpoint
    pub fn url(&self) -> &str {
        match self {
            Cluster::Localnet => LOCALNET_URL,
            Cluster::Devnet => DEVNET_URL,
            Cluster::Testnet => TESTNET_URL,
            Cluster::Mainnet => MAINNET_URL,
            Cluster::Custom { url, .. } => url,
        }
    }

    /// Websocket endpoint
    pub fn ws_url(&self) -> &str {
        match self {
            Cluster::Localnet => LOCALNET_WS,
            Cluster::Devnet => DEVNET_WS,
            Cluster::Testnet => TESTNET_WS,
            Cluster::Mainnet => MAINNET_WS,
            Cluster::Custom { ws_url, .. } => ws_url,
        }
    }

    /// Section name under `[programs.*]` that lists this cluster's deployments.
    ///
    /// Custom endpoints read the localnet section.
    pub fn programs_section(&self) -> &'static str {
        match self {
            Cluster::Localnet | Cluster::Custom { .. } => "localnet",
            Cluster::Devnet => "devnet",
            Cluster::Testnet => "testnet",
            Cluster::Mainnet => "mainnet",
        }
    }

    fn from_url(raw: &str) -> Result<Self> {
        let mut url = Url::parse(raw).map_err(|_| Error::InvalidCluster(raw.to_string()))?;
        let local = matches!(url.host_str(), Some("127.0.0.1") | Some("localhost"));
        match (url.scheme(), url.port_or_known_default()) {
            ("http", Some(8899)) if local => return Ok(Cluster::Localnet),
            ("http", _) | ("https", _) => {}
            _ => return Err(Error::InvalidCluster(raw.to_string())),
        }
        let trimmed = raw.trim_end_matches('/');
        for known in [Cluster::Devnet, Cluster::Testnet, Cluster::Mainnet] {
            if known.url() == trimmed {
                return Ok(known);
            }
        }

        let ws_scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        // Local validators serve websockets one port above RPC.
        if local {
            if let Some(port) = url.port() {
                let ws_port = port
                    .checked_add(1)
                    .ok_or_else(|| Error::InvalidCluster(raw.to_string()))?;
                url.set_port(Some(ws_port))
                    .map_err(|_| Error::InvalidCluster(raw.to_string()))?;
            }
        }
        url.set_scheme(ws_scheme)
            .map_err(|_| Error::InvalidCluster(raw.to_string()))?;
        Ok(Cluster::Custom {
            url: raw.to_string(),
            ws_url: url.to_string(),
        })
    }
}

impl FromStr for Cluster {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "localnet" | "localhost" => Ok(Cluster::Localnet),
            "d" | "devnet" => Ok(Cluster::Devnet),
            "t" | "testnet" => Ok(Cluster::Testnet),
            "m" | "mainnet" | "mainnet-beta" => Ok(Cluster::Mainnet),
            _ => Cluster::from_url(s),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cluster::Localnet => f.write_str("localnet"),
            Cluster::Devnet => f.write_str("devnet"),
            Cluster::Testnet => f.write_str("testnet"),
            Cluster::Mainnet => f.write_str("mainnet"),
            Cluster::Custom { url, .. } => f.write_str(url),
        }
    }
}
