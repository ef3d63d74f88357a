//! Local filesystem storage implementation.
//!
//! Tables are written as `;`-delimited UTF-8 text. Writes go to a temporary
//! file first and are renamed into place, so a failed run never leaves a
//! half-written export behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::ListingTable;
use crate::storage::TableStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl TableStorage for LocalStorage {
    async fn write_table(&self, name: &str, table: &ListingTable) -> Result<PathBuf> {
        let text = table.to_csv_string()?;
        let path = self.write_bytes(name, text.as_bytes()).await?;
        log::info!("{} rows written to {}", table.len(), path.display());
        Ok(path)
    }

    async fn read_table(&self, name: &str) -> Result<Option<ListingTable>> {
        match self.read_bytes(name).await? {
            Some(bytes) => Ok(Some(ListingTable::read_csv(bytes.as_slice())?)),
            None => {
                log::warn!("No table found at {}", self.path(name).display());
                Ok(None)
            }
        }
    }

    fn location(&self, name: &str) -> PathBuf {
        self.path(name)
    }
}
