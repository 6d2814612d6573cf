//! Product Records

use frutos::products::Product;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<StoredProduct>;

/// A derived product as kept in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProduct {
    pub uuid: ProductUuid,

    #[serde(flatten)]
    pub product: Product,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StoredProduct {
    /// Wrap a freshly derived product under a new UUID.
    pub fn new(product: Product, now: Timestamp) -> Self {
        Self {
            uuid: ProductUuid::new(),
            product,
            created_at: now,
            updated_at: now,
        }
    }
}
