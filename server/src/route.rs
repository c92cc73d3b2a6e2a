//! ```text
//! GET  /                 greeting, personalised when a bearer token is sent
//! POST /auth/challenge   ChallengeQuery -> Challenge
//! POST /auth/authorize   TokenRequest -> TokenGrant
//! POST /upload           multipart, bearer required -> UploadReceipt
//! ```

use crate::auth::bearer::Claim;
use crate::auth::{issue_challenge, issue_token, AuthService};
use crate::conf::Config;
use crate::error::Result;
use crate::upload::{receive_upload, UploadDir};
use axum::extract::{DefaultBodyLimit, FromRef};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Clone, FromRef)]
pub struct AppState {
    /// Login and token checks
    pub auth: AuthService,
    /// Upload target
    pub uploads: UploadDir,
}

impl AppState {
    /// Build state from configuration
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            auth: AuthService::new(&config.auth)?,
            uploads: UploadDir::new(&config.upload_dir),
        })
    }
}

/// Build the application router
pub fn router(config: &Config) -> Result<Router> {
    let state = AppState::new(config)?;
    let auth = Router::new()
        .route("/challenge", post(issue_challenge))
        .route("/authorize", post(issue_token));

    Ok(Router::new()
        .route("/", get(index))
        .nest("/auth", auth)
        .route(
            "/upload",
            post(receive_upload).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn index(claim: Option<Claim>) -> String {
    match claim {
        Some(claim) => format!("Hello, {}!", claim.sub),
        None => "Hello, guest!".to_string(),
    }
}
