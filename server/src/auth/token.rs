//! HS256 bearer tokens scoped to one audience.

use crate::auth::bearer::Claim;
use crate::auth::error::{AuthError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

/// Issues and verifies JWTs; cheap to clone
#[derive(Clone)]
pub struct TokenSigner {
    keys: Arc<Keys>,
}

struct Keys {
    audience: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    /// Signer keyed with `secret` for `audience`
    pub fn new(secret: &[u8], audience: impl Into<String>) -> Self {
        let audience = audience.into();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&audience]);
        Self {
            keys: Arc::new(Keys {
                audience,
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
            }),
        }
    }

    #[allow(missing_docs)]
    pub fn audience(&self) -> &str {
        &self.keys.audience
    }

    /// Token for `sub` that expires at `exp` (unix seconds).
    pub fn issue(&self, sub: impl Into<String>, exp: u64) -> Result<(String, Claim)> {
        let claim = Claim {
            sub: sub.into(),
            aud: self.keys.audience.clone(),
            exp,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claim, &self.keys.encoding)
            .map_err(AuthError::Issue)?;
        Ok((token, claim))
    }

    /// Signature, expiry and audience must all hold.
    pub fn check(&self, token: &str) -> Result<Claim> {
        let data = jsonwebtoken::decode::<Claim>(token, &self.keys.decoding, &self.keys.validation)?;
        Ok(data.claims)
    }
}
