//! Storage provider trait for the shared upload directory.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// Metadata about a stored file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StorageObjectMeta {
    /// File name within the storage root.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modified timestamp.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// A byte stream type used for reading file contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for flat file storage backends.
///
/// Paths are single file names relative to the provider root; callers are
/// responsible for sanitizing them first.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read a file and return its byte stream together with its size.
    async fn read(&self, name: &str) -> AppResult<(ByteStream, u64)>;

    /// Write bytes to a file, replacing any existing content.
    async fn write(&self, name: &str, data: Bytes) -> AppResult<()>;

    /// Delete a file. Deleting a missing file is not an error.
    async fn delete(&self, name: &str) -> AppResult<()>;

    /// Check whether a regular file exists.
    async fn exists(&self, name: &str) -> AppResult<bool>;

    /// List the regular files at the root, sorted by name.
    async fn list(&self) -> AppResult<Vec<StorageObjectMeta>>;
}
