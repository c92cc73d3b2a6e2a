//! JSON bodies exchanged with the backend.

pub mod auth;
pub mod upload;
