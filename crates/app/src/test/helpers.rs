//! Test Helpers

use frutos::{
    fixtures::{Fixture, FixtureError},
    products::{Product, ProductDraft},
};

/// Draft of a product from the `catalogo` fixture set.
pub(crate) fn catalog_draft(key: &str) -> Result<ProductDraft, FixtureError> {
    Ok(Fixture::from_set("catalogo")?.draft(key)?.clone())
}

/// Derived product from the `catalogo` fixture set.
pub(crate) fn catalog_product(key: &str) -> Result<Product, FixtureError> {
    Fixture::from_set("catalogo")?.product(key)
}
