//! App Context

use std::sync::Arc;

use crate::{
    config::storage::StorageConfig,
    domain::{
        carts::FileCartStorage,
        products::{CatalogProductsService, JsonFileProductsRepository, ProductsService},
    },
};

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: FileCartStorage,
}

impl AppContext {
    /// Build application context over the configured data directory.
    #[must_use]
    pub fn from_storage_config(config: &StorageConfig) -> Self {
        let repository = JsonFileProductsRepository::new(config.products_path());

        Self {
            products: Arc::new(CatalogProductsService::new(repository)),
            carts: FileCartStorage::new(config.carts_dir()),
        }
    }
}
