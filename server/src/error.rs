//! Request errors and their HTTP status.

use crate::auth::error::AuthError;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Anything a handler or startup can fail with
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Login or bearer token refused
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Body is not valid multipart, or exceeds the limit
    #[error("bad multipart body: {0}")]
    Multipart(#[from] MultipartError),
    /// Multipart body without a single field
    #[error("upload has no file parts")]
    EmptyUpload,
    #[allow(missing_docs)]
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// Config file is not valid TOML for [`crate::conf::Config`]
    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
}

#[allow(missing_docs)]
pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Auth(e) => e.status(),
            Error::Multipart(e) => e.status(),
            Error::EmptyUpload => StatusCode::BAD_REQUEST,
            Error::Io(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
