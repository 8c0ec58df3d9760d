//! File storage gateway: the only path by which handlers touch the upload
//! directory.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use mediashare_core::error::AppError;
use mediashare_core::result::AppResult;
use mediashare_core::traits::storage::{ByteStream, StorageObjectMeta, StorageProvider};
use mediashare_core::types::MediaCategory;

use crate::filename::{is_allowed, is_plain_name, sanitize_filename};

/// Result of a store request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The file was written under the sanitized name.
    Stored(String),
    /// The extension is outside the upload allow-set; nothing was written.
    RejectedExtension,
    /// Sanitizing left no usable name; nothing was written.
    RejectedName,
}

/// A file opened for download.
pub struct RetrievedFile {
    /// Stored file name.
    pub name: String,
    /// Content type guessed from the extension.
    pub content_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// The file contents.
    pub stream: ByteStream,
}

impl std::fmt::Debug for RetrievedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// Mediates every read and write of the shared upload directory.
#[derive(Debug, Clone)]
pub struct FileGateway {
    provider: Arc<dyn StorageProvider>,
}

impl FileGateway {
    /// Create a gateway over the given provider.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self { provider }
    }

    /// Check whether the underlying provider is reachable.
    pub async fn is_healthy(&self) -> bool {
        self.provider.health_check().await.unwrap_or(false)
    }

    /// Every regular file in the directory, sorted by name.
    pub async fn list_all(&self) -> AppResult<Vec<StorageObjectMeta>> {
        self.provider.list().await
    }

    /// Files whose name ends with one of the category's suffixes.
    pub async fn list_by_category(
        &self,
        category: MediaCategory,
    ) -> AppResult<Vec<StorageObjectMeta>> {
        let mut files = self.list_all().await?;
        files.retain(|f| category.matches(&f.name));
        Ok(files)
    }

    /// Store an uploaded file.
    ///
    /// Disallowed extensions and names that sanitize to nothing are skipped
    /// without error. An existing file with the same sanitized name is
    /// overwritten.
    pub async fn store(&self, filename: &str, content: Bytes) -> AppResult<StoreOutcome> {
        if !is_allowed(filename) {
            info!(filename, "Upload rejected: extension not allowed");
            return Ok(StoreOutcome::RejectedExtension);
        }

        let Some(safe_name) = sanitize_filename(filename) else {
            info!(filename, "Upload rejected: empty name after sanitizing");
            return Ok(StoreOutcome::RejectedName);
        };

        let bytes = content.len();
        self.provider.write(&safe_name, content).await?;
        info!(name = %safe_name, bytes, "Stored upload");
        Ok(StoreOutcome::Stored(safe_name))
    }

    /// Open a stored file for download.
    ///
    /// Names that could resolve outside the directory are reported as
    /// not found.
    pub async fn retrieve(&self, filename: &str) -> AppResult<RetrievedFile> {
        if !is_plain_name(filename) {
            warn!(filename, "Blocked download outside storage directory");
            return Err(AppError::not_found(format!("File not found: {filename}")));
        }

        let (stream, size_bytes) = self.provider.read(filename).await?;
        Ok(RetrievedFile {
            name: filename.to_string(),
            content_type: mime_guess::from_path(filename)
                .first_or_octet_stream()
                .to_string(),
            size_bytes,
            stream,
        })
    }

    /// Remove a stored file. Missing files and unsafe names are a no-op.
    pub async fn delete(&self, filename: &str) -> AppResult<()> {
        if !is_plain_name(filename) {
            warn!(filename, "Blocked delete outside storage directory");
            return Ok(());
        }

        if self.provider.exists(filename).await? {
            self.provider.delete(filename).await?;
            info!(filename, "Deleted file");
        }
        Ok(())
    }
}
