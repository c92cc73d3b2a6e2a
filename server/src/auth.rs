//! Wallet login.
//!
//! The server hands out a [`Challenge`] bound to the wallet and the current
//! time. Whoever can sign it with the wallet's key gets a JWT whose `sub` is
//! the wallet.

pub mod bearer;
pub mod challenge;
pub mod error;
pub mod token;

use crate::auth::bearer::Claim;
use crate::auth::challenge::ChallengeKey;
use crate::auth::error::{AuthError, Result};
use crate::auth::token::TokenSigner;
use crate::conf::AuthConfig;
use axum::extract::State;
use axum::Json;
use jsonwebtoken::get_current_timestamp;
use music3_common::wire::auth::{Challenge, ChallengeQuery, TokenGrant, TokenRequest};
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, info, warn};

/// Issues challenges and exchanges signed ones for tokens
#[derive(Clone)]
pub struct AuthService {
    challenges: ChallengeKey,
    tokens: TokenSigner,
    max_duration_sec: u64,
    timestamp_timeout_sec: u64,
}

impl AuthService {
    /// Service keyed from `[auth]`
    pub fn new(config: &AuthConfig) -> Result<Self> {
        Ok(Self {
            challenges: ChallengeKey::new(config.hmac_secret.as_bytes())?,
            tokens: TokenSigner::new(config.token.secret.as_ref(), &config.token.audience),
            max_duration_sec: config.token.max_duration_sec,
            timestamp_timeout_sec: config.token.timestamp_timeout_sec,
        })
    }

    /// Challenge for `wallet`, stamped with the current time
    pub fn challenge(&self, wallet: &Pubkey) -> Challenge {
        self.challenge_at(wallet, get_current_timestamp())
    }

    #[allow(missing_docs)]
    pub fn challenge_at(&self, wallet: &Pubkey, now: u64) -> Challenge {
        Challenge {
            hmac: self.challenges.sign(wallet, now),
            timestamp: now,
        }
    }

    /// Accepted from the moment of issue until `timestamp_timeout_sec` later.
    pub fn within_window(&self, timestamp: u64, now: u64) -> bool {
        timestamp <= now && now <= timestamp.saturating_add(self.timestamp_timeout_sec)
    }

    /// Cheap checks first: duration, then clock, then MAC, then the ed25519
    /// signature.
    pub fn check_request(&self, req: &TokenRequest, now: u64) -> Result<()> {
        if req.duration > self.max_duration_sec {
            return Err(AuthError::DurationTooLong {
                max: self.max_duration_sec,
                got: req.duration,
            });
        }
        if !self.within_window(req.timestamp, now) {
            return Err(AuthError::StaleChallenge);
        }
        if !self.challenges.matches(&req.pub_key, req.timestamp, &req.hmac) {
            return Err(AuthError::ForeignChallenge);
        }
        if !req.signature.verify(req.pub_key.as_ref(), &req.signing_payload()) {
            return Err(AuthError::BadSignature);
        }
        Ok(())
    }

    /// Check `req` against the current time and issue a token for its wallet
    pub fn grant(&self, req: &TokenRequest) -> Result<TokenGrant> {
        self.grant_at(req, get_current_timestamp())
    }

    #[allow(missing_docs)]
    pub fn grant_at(&self, req: &TokenRequest, now: u64) -> Result<TokenGrant> {
        self.check_request(req, now)?;
        let (jwt, claim) = self
            .tokens
            .issue(req.pub_key.to_string(), now.saturating_add(req.duration))?;
        Ok(TokenGrant {
            pub_key: req.pub_key,
            jwt,
            exp: claim.exp,
        })
    }

    /// Verify a bearer token
    pub fn claim_for(&self, token: &str) -> Result<Claim> {
        self.tokens.check(token)
    }
}

/// `POST /auth/challenge`
pub async fn issue_challenge(
    State(auth): State<AuthService>,
    Json(query): Json<ChallengeQuery>,
) -> Json<Challenge> {
    debug!(wallet = %query.pub_key, "challenge issued");
    Json(auth.challenge(&query.pub_key))
}

/// `POST /auth/authorize`
pub async fn issue_token(
    State(auth): State<AuthService>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenGrant>> {
    let grant = auth.grant(&req).inspect_err(|e| {
        warn!(wallet = %req.pub_key, error = %e, "login refused");
    })?;
    info!(wallet = %req.pub_key, exp = grant.exp, "login granted");
    Ok(Json(grant))
}
