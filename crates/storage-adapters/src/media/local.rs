//! Local filesystem implementation of `MediaStorage`.
//! Features: content-addressable storage and directory sharding.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use domains::{DomainError, DomainResult, MediaStorage};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, info};

pub struct LocalMediaStorage {
    /// Root directory for all uploads (e.g., "./public/uploads")
    root_path: PathBuf,
    /// Public URL prefix (e.g., "/uploads")
    url_prefix: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root_path: root.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_owned(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// "ab/cd/abcd...hash.ext"
    fn relative_path(hash: &str, ext: &str) -> String {
        format!("{}/{}/{hash}.{ext}", &hash[0..2], &hash[2..4])
    }
}

/// Picks the file extension: the upload's own if it has a sane one,
/// otherwise the first one registered for the content type.
fn extension_for(original_name: Option<&str>, content_type: &mime::Mime) -> String {
    original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .or_else(|| {
            mime_guess::get_mime_extensions(content_type)
                .and_then(|exts| exts.first())
                .map(|ext| (*ext).to_owned())
        })
        .unwrap_or_else(|| "bin".to_owned())
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    /// Saves an upload using its SHA-256 hash as the filename.
    /// Identical uploads land on the same file.
    async fn store(
        &self,
        original_name: Option<String>,
        content_type: mime::Mime,
        data: Bytes,
    ) -> DomainResult<String> {
        if content_type.type_() != mime::IMAGE {
            return Err(DomainError::Validation(format!(
                "only image uploads are accepted, got {content_type}"
            )));
        }
        if data.is_empty() {
            return Err(DomainError::Validation("uploaded image is empty".to_owned()));
        }

        let hash = hex::encode(Sha256::digest(&data));
        let ext = extension_for(original_name.as_deref(), &content_type);
        let relative = Self::relative_path(&hash, &ext);
        let target_path = self.root_path.join(&relative);

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Internal(format!("create {}: {e}", parent.display())))?;
        }

        if fs::try_exists(&target_path).await.unwrap_or(false) {
            debug!(path = %target_path.display(), "upload already stored");
        } else {
            fs::write(&target_path, &data)
                .await
                .map_err(|e| DomainError::Internal(format!("write {}: {e}", target_path.display())))?;
            info!(path = %target_path.display(), bytes = data.len(), "upload stored");
        }

        Ok(format!("{}/{relative}", self.url_prefix))
    }
}
