//! Types shared by the music3 backend and its clients.
#![deny(unsafe_code, missing_docs, clippy::unwrap_used)]

pub mod encoding;
pub mod wire;
