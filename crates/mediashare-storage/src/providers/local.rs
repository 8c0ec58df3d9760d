//! Local filesystem storage provider.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use mediashare_core::error::{AppError, ErrorKind};
use mediashare_core::result::AppResult;
use mediashare_core::traits::storage::{ByteStream, StorageObjectMeta, StorageProvider};

use crate::filename::is_plain_name;

/// Local filesystem storage provider over a single flat directory.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Directory holding every stored file.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path,
    /// creating the directory if needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a file name to a path inside the root.
    fn resolve(&self, name: &str) -> AppResult<PathBuf> {
        if !is_plain_name(name) {
            return Err(AppError::validation(format!(
                "Refusing path outside storage root: {name}"
            )));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn read(&self, name: &str) -> AppResult<(ByteStream, u64)> {
        let full_path = self.resolve(name)?;
        let not_found = || AppError::not_found(format!("File not found: {name}"));

        let meta = fs::metadata(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                not_found()
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to stat file: {name}"), e)
            }
        })?;
        if !meta.is_file() {
            return Err(not_found());
        }

        let file = fs::File::open(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                not_found()
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to open file: {name}"), e)
            }
        })?;

        let stream = ReaderStream::new(file);
        Ok((Box::pin(stream.map(|r| r.map(Bytes::from))), meta.len()))
    }

    async fn write(&self, name: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(name)?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, format!("Failed to write file: {name}"), e)
        })?;

        debug!(name, bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        let full_path = self.resolve(name)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(name, "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {name}"),
                e,
            )),
        }
    }

    async fn exists(&self, name: &str) -> AppResult<bool> {
        let full_path = self.resolve(name)?;
        Ok(fs::metadata(&full_path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false))
    }

    async fn list(&self) -> AppResult<Vec<StorageObjectMeta>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to list directory: {}", self.root.display()),
                e,
            )
        })?;

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let entry_meta = entry.metadata().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to get entry metadata", e)
            })?;
            if !entry_meta.is_file() {
                continue;
            }

            let last_modified = entry_meta
                .modified()
                .ok()
                .map(chrono::DateTime::<chrono::Utc>::from);

            entries.push(StorageObjectMeta {
                name: entry.file_name().to_string_lossy().to_string(),
                size_bytes: entry_meta.len(),
                last_modified,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
