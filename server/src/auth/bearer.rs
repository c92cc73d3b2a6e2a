//! `Authorization: Bearer <jwt>` extraction.
//!
//! Handlers take [`Claim`] to require a login, or `Option<Claim>` to accept
//! guests. A header that is present but fails verification is refused either
//! way.

use crate::auth::error::AuthError;
use crate::auth::AuthService;
use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use serde::{Deserialize, Serialize};

/// Verified token contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Wallet, base58
    pub sub: String,
    /// Audience the token was issued for
    pub aud: String,
    /// Expiry, unix seconds
    pub exp: u64,
}

type BearerHeader = TypedHeader<Authorization<Bearer>>;

impl<S> FromRequestParts<S> for Claim
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts.extract::<BearerHeader>().await?;
        AuthService::from_ref(state).claim_for(bearer.token())
    }
}

impl<S> OptionalFromRequestParts<S> for Claim
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match parts.extract::<BearerHeader>().await {
            Ok(TypedHeader(Authorization(bearer))) => {
                AuthService::from_ref(state).claim_for(bearer.token()).map(Some)
            }
            Err(rejection) if rejection.is_missing() => Ok(None),
            Err(rejection) => Err(rejection.into()),
        }
    }
}
