//! Cart Storage

use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::{fs, sync::RwLock};

use crate::domain::carts::errors::CartsStorageError;

/// Client-side key-value storage the cart blob lives in.
#[automock]
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// The value stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>, CartsStorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: String) -> Result<(), CartsStorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    values: RwLock<FxHashMap<String, String>>,
}

impl MemoryCartStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStorage for MemoryCartStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, CartsStorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: String) -> Result<(), CartsStorageError> {
        self.values.write().await.insert(key.to_string(), value);

        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    dir: PathBuf,
}

impl FileCartStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl CartStorage for FileCartStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, CartsStorageError> {
        match fs::read_to_string(self.path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn write(&self, key: &str, value: String) -> Result<(), CartsStorageError> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.path(key), value).await?;

        Ok(())
    }
}
