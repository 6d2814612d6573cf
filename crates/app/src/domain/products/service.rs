//! Products service.

use async_trait::async_trait;
use frutos::products::{ProductDraft, ProductPatch, derive, update};
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::domain::products::{
    errors::ProductsServiceError,
    records::{ProductUuid, StoredProduct},
    repository::ProductsRepository,
};

/// Catalog listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Only products belonging to this category, compared without case
    pub category: Option<String>,

    /// Only products with stock in at least one tier
    pub in_stock_only: bool,
}

impl ProductFilter {
    fn matches(&self, record: &StoredProduct) -> bool {
        if self.in_stock_only && !record.product.in_stock() {
            return false;
        }

        self.category
            .as_deref()
            .is_none_or(|category| record.product.belongs_to(category))
    }
}

#[derive(Debug)]
pub struct CatalogProductsService<R> {
    repository: R,
}

impl<R: ProductsRepository> CatalogProductsService<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    async fn fetch(&self, product: ProductUuid) -> Result<StoredProduct, ProductsServiceError> {
        self.repository
            .get(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }
}

#[async_trait]
impl<R: ProductsRepository> ProductsService for CatalogProductsService<R> {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<StoredProduct>, ProductsServiceError> {
        let mut products: Vec<StoredProduct> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();

        products.sort_by(|a, b| {
            a.product
                .name()
                .cmp(b.product.name())
                .then(a.uuid.cmp(&b.uuid))
        });

        Ok(products)
    }

    async fn list_categories(&self) -> Result<Vec<String>, ProductsServiceError> {
        let mut categories: Vec<String> = self
            .repository
            .list()
            .await?
            .iter()
            .flat_map(|record| record.product.categories().iter().cloned())
            .collect();

        categories.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        categories.dedup_by(|a, b| a.to_lowercase() == b.to_lowercase());

        Ok(categories)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<StoredProduct, ProductsServiceError> {
        self.fetch(product).await
    }

    async fn create_product(
        &self,
        draft: ProductDraft,
    ) -> Result<StoredProduct, ProductsServiceError> {
        let record = StoredProduct::new(derive(draft)?, Timestamp::now());

        self.repository.insert(record.clone()).await?;

        info!(uuid = %record.uuid, name = record.product.name(), "created product");

        Ok(record)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        patch: ProductPatch,
    ) -> Result<StoredProduct, ProductsServiceError> {
        let existing = self.fetch(product).await?;

        let record = StoredProduct {
            product: update(&existing.product, patch)?,
            updated_at: Timestamp::now(),
            ..existing
        };

        if !self.repository.replace(record.clone()).await? {
            return Err(ProductsServiceError::NotFound);
        }

        info!(uuid = %record.uuid, "updated product");

        Ok(record)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        if !self.repository.delete(product).await? {
            return Err(ProductsServiceError::NotFound);
        }

        info!(uuid = %product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves the catalog, sorted by name.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<StoredProduct>, ProductsServiceError>;

    /// Every category any product belongs to, sorted.
    async fn list_categories(&self) -> Result<Vec<String>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<StoredProduct, ProductsServiceError>;

    /// Validates and derives a submission, then stores it under a new UUID.
    async fn create_product(
        &self,
        draft: ProductDraft,
    ) -> Result<StoredProduct, ProductsServiceError>;

    /// Merges a partial update into the stored product and re-derives it.
    async fn update_product(
        &self,
        product: ProductUuid,
        patch: ProductPatch,
    ) -> Result<StoredProduct, ProductsServiceError>;

    /// Deletes a product with the given UUID.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}
