//! Music3 backend: wallet-signature authorization and music uploads.
#![deny(unsafe_code, missing_docs, clippy::unwrap_used)]

pub mod auth;
pub mod conf;
pub mod error;
pub mod route;
pub mod upload;
