//! Products

pub mod errors;
pub mod records;
pub mod repository;
pub mod service;

pub use errors::{ProductsServiceError, StoreError};
pub use records::{ProductUuid, StoredProduct};
pub use repository::{InMemoryProductsRepository, JsonFileProductsRepository, ProductsRepository};
pub use service::*;
