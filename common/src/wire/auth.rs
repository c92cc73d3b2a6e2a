//! Wallet login.
//!
//! A [`ChallengeQuery`] names the wallet; the server replies with a
//! [`Challenge`] bound to that key and to its own clock. The wallet signs
//! [`Challenge::signing_payload`] and sends the result back in a
//! [`TokenRequest`], which the server exchanges for a [`TokenGrant`].

use crate::encoding::Base64;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;

/// Body of `POST /auth/challenge`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeQuery {
    /// Wallet asking to log in
    #[serde(with = "crate::encoding::as_display")]
    pub pub_key: Pubkey,
}

/// Server-issued challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Keyed MAC over the wallet and `timestamp`
    pub hmac: Base64,
    /// Server time of issue, unix seconds
    pub timestamp: u64,
}

impl Challenge {
    /// Bytes the wallet signs
    pub fn signing_payload(&self) -> Vec<u8> {
        signing_payload(&self.hmac, self.timestamp)
    }
}

/// Body of `POST /auth/authorize`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    #[allow(missing_docs)]
    #[serde(with = "crate::encoding::as_display")]
    pub pub_key: Pubkey,
    /// Wallet signature over [`TokenRequest::signing_payload`]
    #[serde(with = "crate::encoding::as_display")]
    pub signature: Signature,
    /// Echoed from the [`Challenge`]
    pub hmac: Base64,
    /// Echoed from the [`Challenge`]
    pub timestamp: u64,
    /// Token lifetime wanted, in seconds
    pub duration: u64,
}

impl TokenRequest {
    /// Bytes the signature must cover
    pub fn signing_payload(&self) -> Vec<u8> {
        signing_payload(&self.hmac, self.timestamp)
    }
}

/// Issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    #[allow(missing_docs)]
    #[serde(with = "crate::encoding::as_display")]
    pub pub_key: Pubkey,
    /// HS256 JWT to send as `Authorization: Bearer`
    pub jwt: String,
    /// Expiry, unix seconds
    pub exp: u64,
}

/// MAC bytes, then the timestamp as a big-endian `u64`.
fn signing_payload(hmac: &[u8], timestamp: u64) -> Vec<u8> {
    [hmac, &timestamp.to_be_bytes()[..]].concat()
}
