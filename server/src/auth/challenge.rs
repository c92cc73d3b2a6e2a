//! Stateless login challenges.
//!
//! A challenge is `HMAC-SHA256(secret, base58(wallet) ++ decimal(timestamp))`.
//! Recomputing it is enough to recognise one we issued, so nothing is stored.

use crate::auth::error::{AuthError, Result};
use hmac::{Hmac, Mac};
use music3_common::encoding::Base64;
use sha2::Sha256;
use solana_sdk::pubkey::Pubkey;

type HmacSha256 = Hmac<Sha256>;

/// Keyed MAC that issues and recognises challenges
#[derive(Clone)]
pub struct ChallengeKey {
    mac: HmacSha256,
}

impl ChallengeKey {
    /// Key the MAC with `secret`
    pub fn new(secret: &[u8]) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret).map_err(|_| AuthError::InvalidSecret)?;
        Ok(Self { mac })
    }

    /// Challenge code for `wallet` at `timestamp`
    pub fn sign(&self, wallet: &Pubkey, timestamp: u64) -> Base64 {
        Base64::from(self.mac_for(wallet, timestamp).finalize().into_bytes().to_vec())
    }

    /// Constant-time comparison against a presented code.
    pub fn matches(&self, wallet: &Pubkey, timestamp: u64, code: &[u8]) -> bool {
        self.mac_for(wallet, timestamp).verify_slice(code).is_ok()
    }

    fn mac_for(&self, wallet: &Pubkey, timestamp: u64) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(wallet.to_string().as_bytes());
        mac.update(timestamp.to_string().as_bytes());
        mac
    }
}
