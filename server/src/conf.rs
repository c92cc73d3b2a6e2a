//! Server configuration, read from a TOML file.
//!
//! Every field has a default, so an empty file (or no file) gives a working
//! local server.

use crate::error::Result;
use music3_common::encoding::Base64;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "MUSIC3_CONFIG";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Authorization
    pub auth: AuthConfig,
    /// Listen address
    pub bind: SocketAddr,
    /// Where uploaded files are written
    pub upload_dir: PathBuf,
    /// Request body limit for uploads
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

/// `[auth]`
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Keys the login challenges
    pub hmac_secret: String,
    /// JWT settings
    pub token: TokenConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            hmac_secret: "music3-hmac-secret".to_string(),
            token: TokenConfig::default(),
        }
    }
}

/// `[auth.token]`
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct TokenConfig {
    /// `aud` written into and required of every token
    pub audience: String,
    /// HS256 key, base64
    pub secret: Base64,
    /// Longest lifetime a client may ask for
    pub max_duration_sec: u64,
    /// How long a challenge stays redeemable
    pub timestamp_timeout_sec: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            audience: "music3".to_string(),
            secret: Base64::from(b"music3-jwt-secret"),
            max_duration_sec: 86_400,
            timestamp_timeout_sec: 120,
        }
    }
}

impl Config {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
