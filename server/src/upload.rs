//! Music uploads, stored under the configured directory as `<uuid>.mp3`.

use crate::auth::bearer::Claim;
use crate::error::{Error, Result};
use axum::extract::{Multipart, State};
use axum::Json;
use music3_common::wire::upload::UploadReceipt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Directory uploads are written into
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: Arc<PathBuf>,
}

impl UploadDir {
    /// Wrap a directory; it is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    /// Directory path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `data` under a fresh `<uuid>.mp3` name and return the name.
    pub async fn store(&self, data: &[u8]) -> Result<String> {
        tokio::fs::create_dir_all(self.root()).await?;
        let name = format!("{}.mp3", Uuid::new_v4());
        tokio::fs::write(self.root.join(&name), data).await?;
        Ok(name)
    }

    /// Remove files written by [`UploadDir::store`]; failures are only logged.
    pub async fn discard(&self, names: &[String]) {
        for name in names {
            if let Err(err) = tokio::fs::remove_file(self.root.join(name)).await {
                warn!(file = %name, error = %err, "could not remove partial upload");
            }
        }
    }
}

/// `POST /upload`
///
/// All or nothing: when a field fails, files already written for this request
/// are removed again.
pub async fn receive_upload(
    claim: Claim,
    State(uploads): State<UploadDir>,
    mut multipart: Multipart,
) -> Result<Json<UploadReceipt>> {
    let mut files = Vec::new();
    if let Err(err) = store_fields(&uploads, &mut multipart, &mut files).await {
        uploads.discard(&files).await;
        return Err(err);
    }
    if files.is_empty() {
        return Err(Error::EmptyUpload);
    }
    info!(sub = %claim.sub, count = files.len(), "upload complete");
    Ok(Json(UploadReceipt { files }))
}

async fn store_fields(
    uploads: &UploadDir,
    multipart: &mut Multipart,
    files: &mut Vec<String>,
) -> Result<()> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        let stored = uploads.store(&data).await?;
        debug!(field = %field_name, bytes = data.len(), file = %stored, "stored field");
        files.push(stored);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_creates_directory_and_unique_names() {
        let tmp = tempfile::tempdir().unwrap();
        let uploads = UploadDir::new(tmp.path().join("nested"));

        let a = uploads.store(b"first").await.unwrap();
        let b = uploads.store(b"second").await.unwrap();
        assert_ne!(a, b);
        assert!(a.ends_with(".mp3"));
        assert_eq!(std::fs::read(uploads.root().join(&a)).unwrap(), b"first");
        assert_eq!(std::fs::read(uploads.root().join(&b)).unwrap(), b"second");
    }

    #[tokio::test]
    async fn discard_removes_stored_files() {
        let tmp = tempfile::tempdir().unwrap();
        let uploads = UploadDir::new(tmp.path());
        let kept = uploads.store(b"kept").await.unwrap();
        let gone = uploads.store(b"gone").await.unwrap();

        uploads
            .discard(&[gone.clone(), "never-stored.mp3".to_string()])
            .await;
        assert!(uploads.root().join(&kept).exists());
        assert!(!uploads.root().join(&gone).exists());
    }
}
