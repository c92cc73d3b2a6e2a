//! HTTP client for the music3 backend.
//!
//! [`ApiClient::login`] runs the whole wallet handshake and returns the JWT
//! that [`ApiClient::upload`] expects.

use crate::error::{Error, Result};
use music3_common::wire::auth::{Challenge, ChallengeQuery, TokenGrant, TokenRequest};
use music3_common::wire::upload::UploadReceipt;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use tracing::debug;

/// Where the backend listens unless told otherwise
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Backend client; cheap to clone
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Client for the backend rooted at `base`
    pub fn new(base: &str) -> Result<Self> {
        Ok(Self::with_url(Url::parse(base)?))
    }

    /// Same as [`ApiClient::new`] for an already parsed URL
    pub fn with_url(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    /// Backend root
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `POST /auth/challenge`
    pub async fn challenge(&self, pub_key: Pubkey) -> Result<Challenge> {
        self.post_json("/auth/challenge", &ChallengeQuery { pub_key })
            .await
    }

    /// `POST /auth/authorize`
    pub async fn exchange(&self, request: &TokenRequest) -> Result<TokenGrant> {
        self.post_json("/auth/authorize", request).await
    }

    /// Fetch a challenge, sign it with `keypair` and trade it for a token
    /// valid for `duration` seconds.
    pub async fn login(&self, keypair: &Keypair, duration: u64) -> Result<TokenGrant> {
        let challenge = self.challenge(keypair.pubkey()).await?;
        let request = TokenRequest {
            pub_key: keypair.pubkey(),
            signature: keypair.sign_message(&challenge.signing_payload()),
            hmac: challenge.hmac,
            timestamp: challenge.timestamp,
            duration,
        };
        let grant = self.exchange(&request).await?;
        debug!(wallet = %grant.pub_key, exp = grant.exp, "logged in");
        Ok(grant)
    }

    /// `POST /upload` with `file` as a single multipart part
    pub async fn upload(&self, jwt: &str, file: Vec<u8>) -> Result<UploadReceipt> {
        let form = Form::new().part("file", Part::bytes(file).file_name("music.mp3"));
        let request = self
            .http
            .post(self.base.join("/upload")?)
            .bearer_auth(jwt)
            .multipart(form);
        send(request).await
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        send(self.http.post(self.base.join(path)?).json(body)).await
    }
}

async fn send<R: DeserializeOwned>(request: RequestBuilder) -> Result<R> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(Error::Status { status, body });
    }
    Ok(response.json().await?)
}
