//! Blob storage for gallery images

use std::path::PathBuf;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::{
    config::UploadsConfig,
    error::{AppError, AppResult},
};

/// Where a blob ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub file_name: String,
    pub url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, name: &str, bytes: &[u8], content_type: Option<&str>) -> AppResult<StoredBlob>;

    /// Remove a blob; a missing blob is not an error
    async fn delete(&self, file_name: &str) -> AppResult<()>;
}

/// Content-addressed name: sha256 of the bytes plus the original extension
pub fn blob_name(original: &str, bytes: &[u8]) -> String {
    let hash = hex::encode(Sha256::digest(bytes));
    let extension = original
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{}.{}", hash, ext),
        None => hash,
    }
}

/// Images on local disk, served under `public_path`
#[derive(Debug, Clone)]
pub struct DiskBlobStore {
    dir: PathBuf,
    public_path: String,
}

impl DiskBlobStore {
    pub fn new(config: &UploadsConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            public_path: config.public_path.trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, file_name: &str) -> AppResult<PathBuf> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return Err(AppError::Validation(format!("Invalid blob name '{}'", file_name)));
        }
        Ok(self.dir.join(file_name))
    }
}

#[async_trait]
impl BlobStore for DiskBlobStore {
    async fn put(&self, name: &str, bytes: &[u8], content_type: Option<&str>) -> AppResult<StoredBlob> {
        let path = self.path_for(name)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload directory: {}", e)))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::debug!(
            "Stored blob {} ({} bytes, {})",
            name,
            bytes.len(),
            content_type.unwrap_or("unknown type")
        );

        Ok(StoredBlob {
            file_name: name.to_string(),
            url: format!("{}/{}", self.public_path, name),
        })
    }

    async fn delete(&self, file_name: &str) -> AppResult<()> {
        let path = self.path_for(file_name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
