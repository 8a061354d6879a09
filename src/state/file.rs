//! Local directory state store.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::state::{StateError, StateKey, StateStore};

/// Stores each key as a file inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &StateKey) -> PathBuf {
        self.dir.join(key.as_str())
    }

    fn io_error(key: &StateKey, source: std::io::Error) -> StateError {
        StateError::Io {
            key: key.to_string(),
            source,
        }
    }
}

#[async_trait]
impl StateStore for FileStore {
    async fn get(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StateError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    async fn put(&self, key: &StateKey, value: &[u8]) -> Result<(), StateError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Self::io_error(key, e))?;

        // Write-then-rename: readers never see a partial blob.
        let path = self.path_for(key);
        let tmp = path.with_extension("txt.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| Self::io_error(key, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Self::io_error(key, e))?;

        tracing::debug!(path = ?path, bytes = value.len(), "Status file written");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}
