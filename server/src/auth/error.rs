//! Login and bearer token failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::typed_header::TypedHeaderRejection;

/// Why a login or a bearer token was refused
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Token lifetime above the configured maximum
    #[error("requested duration {got}s exceeds the {max}s limit")]
    DurationTooLong {
        /// Configured maximum, seconds
        max: u64,
        /// Requested, seconds
        got: u64,
    },
    /// Challenge timestamp outside the redeem window
    #[error("challenge expired or issued in the future")]
    StaleChallenge,
    /// HMAC does not match the wallet and timestamp
    #[error("challenge was not issued by this server")]
    ForeignChallenge,
    /// Ed25519 signature does not verify against the wallet
    #[error("wallet signature does not match the challenge")]
    BadSignature,
    /// No usable `Authorization: Bearer` header
    #[error("missing or malformed bearer token: {0}")]
    MissingBearer(#[from] TypedHeaderRejection),
    /// Bad signature, audience or expiry on a presented token
    #[error("token rejected: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    /// Signing failed on our side.
    #[error("could not issue token: {0}")]
    Issue(jsonwebtoken::errors::Error),
    /// HMAC key rejected at startup
    #[error("unusable HMAC secret")]
    InvalidSecret,
}

#[allow(missing_docs)]
pub type Result<T> = std::result::Result<T, AuthError>;

impl AuthError {
    /// 500 for failures on our side, 401 otherwise
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Issue(_) | AuthError::InvalidSecret => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
