//! Products Repository

use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::{
    fs,
    sync::{RwLock, RwLockWriteGuard},
};
use tracing::debug;

use crate::domain::products::{
    errors::StoreError,
    records::{ProductUuid, StoredProduct},
};

type Documents = FxHashMap<ProductUuid, StoredProduct>;

/// Document store holding product records.
#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Every stored record, in no particular order.
    async fn list(&self) -> Result<Vec<StoredProduct>, StoreError>;

    /// A single record.
    async fn get(&self, uuid: ProductUuid) -> Result<Option<StoredProduct>, StoreError>;

    /// Store a new record.
    async fn insert(&self, record: StoredProduct) -> Result<(), StoreError>;

    /// Overwrite an existing record. Returns `false` when none matched.
    async fn replace(&self, record: StoredProduct) -> Result<bool, StoreError>;

    /// Hard delete a record. Returns `false` when none matched.
    async fn delete(&self, uuid: ProductUuid) -> Result<bool, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryProductsRepository {
    documents: RwLock<Documents>,
}

impl InMemoryProductsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductsRepository for InMemoryProductsRepository {
    async fn list(&self) -> Result<Vec<StoredProduct>, StoreError> {
        Ok(self.documents.read().await.values().cloned().collect())
    }

    async fn get(&self, uuid: ProductUuid) -> Result<Option<StoredProduct>, StoreError> {
        Ok(self.documents.read().await.get(&uuid).cloned())
    }

    async fn insert(&self, record: StoredProduct) -> Result<(), StoreError> {
        insert_document(&mut *self.documents.write().await, record)
    }

    async fn replace(&self, record: StoredProduct) -> Result<bool, StoreError> {
        Ok(replace_document(&mut *self.documents.write().await, record))
    }

    async fn delete(&self, uuid: ProductUuid) -> Result<bool, StoreError> {
        Ok(self.documents.write().await.remove(&uuid).is_some())
    }
}

/// Products kept as a JSON array in a single file.
///
/// The file is read on first access and rewritten after every mutation. A missing file is an
/// empty store.
#[derive(Debug)]
pub struct JsonFileProductsRepository {
    path: PathBuf,
    documents: RwLock<Option<Documents>>,
}

impl JsonFileProductsRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            documents: RwLock::new(None),
        }
    }

    async fn documents(&self) -> Result<RwLockWriteGuard<'_, Option<Documents>>, StoreError> {
        let mut guard = self.documents.write().await;

        if guard.is_none() {
            *guard = Some(self.read_file().await?);
        }

        Ok(guard)
    }

    /// Apply `change` to a copy of the documents and swap it in only once the file is written.
    async fn commit<T>(
        &self,
        change: impl FnOnce(&mut Documents) -> Result<Option<T>, StoreError>,
    ) -> Result<Option<T>, StoreError> {
        let mut guard = self.documents().await?;
        let mut documents = guard.clone().unwrap_or_default();

        let Some(outcome) = change(&mut documents)? else {
            return Ok(None);
        };

        self.write_file(&documents).await?;
        *guard = Some(documents);

        Ok(Some(outcome))
    }

    async fn read_file(&self) -> Result<Documents, StoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Documents::default()),
            Err(error) => return Err(error.into()),
        };

        let records: Vec<StoredProduct> = serde_json::from_str(&contents)?;

        debug!(path = %self.path.display(), count = records.len(), "loaded product store");

        Ok(records
            .into_iter()
            .map(|record| (record.uuid, record))
            .collect())
    }

    async fn write_file(&self, documents: &Documents) -> Result<(), StoreError> {
        let mut records: Vec<&StoredProduct> = documents.values().collect();

        records.sort_by_key(|record| record.uuid);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&self.path, serde_json::to_vec_pretty(&records)?).await?;

        Ok(())
    }
}

#[async_trait]
impl ProductsRepository for JsonFileProductsRepository {
    async fn list(&self) -> Result<Vec<StoredProduct>, StoreError> {
        let mut guard = self.documents().await?;
        let documents = guard.get_or_insert_with(Documents::default);

        Ok(documents.values().cloned().collect())
    }

    async fn get(&self, uuid: ProductUuid) -> Result<Option<StoredProduct>, StoreError> {
        let mut guard = self.documents().await?;
        let documents = guard.get_or_insert_with(Documents::default);

        Ok(documents.get(&uuid).cloned())
    }

    async fn insert(&self, record: StoredProduct) -> Result<(), StoreError> {
        self.commit(|documents| insert_document(documents, record).map(Some))
            .await
            .map(|_| ())
    }

    async fn replace(&self, record: StoredProduct) -> Result<bool, StoreError> {
        let replaced = self
            .commit(|documents| Ok(replace_document(documents, record).then_some(())))
            .await?;

        Ok(replaced.is_some())
    }

    async fn delete(&self, uuid: ProductUuid) -> Result<bool, StoreError> {
        let deleted = self
            .commit(|documents| Ok(documents.remove(&uuid).map(|_| ())))
            .await?;

        Ok(deleted.is_some())
    }
}

fn insert_document(documents: &mut Documents, record: StoredProduct) -> Result<(), StoreError> {
    if documents.contains_key(&record.uuid) {
        return Err(StoreError::AlreadyExists(record.uuid));
    }

    documents.insert(record.uuid, record);

    Ok(())
}

fn replace_document(documents: &mut Documents, record: StoredProduct) -> bool {
    match documents.get_mut(&record.uuid) {
        Some(existing) => {
            *existing = record;
            true
        }
        None => false,
    }
}
