//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::products::{Product, ProductDraft, ValidationErrors, derive};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The product draft does not derive
    #[error("Invalid product fixture {name}: {source}")]
    Invalid {
        /// Fixture key of the product
        name: String,
        /// Validation failures
        source: ValidationErrors,
    },
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct ProductsFixture {
    /// Map of product key -> product draft
    products: FxHashMap<String, ProductDraft>,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Fixture key -> draft
    drafts: FxHashMap<String, ProductDraft>,
}

impl Fixture {
    /// Create a new empty fixture reading from this crate's `fixtures` directory
    pub fn new() -> Self {
        Self::with_base_path(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures"))
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            drafts: FxHashMap::default(),
        }
    }

    /// Load product drafts from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        self.drafts.extend(fixture.products);

        Ok(self)
    }

    /// Load a named product set from the default fixture directory
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?;

        Ok(fixture)
    }

    /// Get a product draft by its fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn draft(&self, key: &str) -> Result<&ProductDraft, FixtureError> {
        self.drafts
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Derive the product stored under a fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or its draft is invalid.
    pub fn product(&self, key: &str) -> Result<Product, FixtureError> {
        derive(self.draft(key)?.clone()).map_err(|source| FixtureError::Invalid {
            name: key.to_string(),
            source,
        })
    }

    /// Fixture keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.drafts.keys().map(String::as_str).collect();

        keys.sort_unstable();

        keys
    }

    /// Every loaded draft, sorted by fixture key
    pub fn drafts(&self) -> Vec<(&str, &ProductDraft)> {
        let mut drafts: Vec<(&str, &ProductDraft)> = self
            .drafts
            .iter()
            .map(|(key, draft)| (key.as_str(), draft))
            .collect();

        drafts.sort_unstable_by_key(|(key, _)| *key);

        drafts
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use testresult::TestResult;

    use crate::{products::ProductField, weights::Weight};

    use super::*;

    fn write_fixture(base: &Path, name: &str, contents: &str) -> TestResult {
        let dir = base.join("products");

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_catalog() -> TestResult {
        let fixture = Fixture::from_set("catalogo")?;

        assert_eq!(fixture.keys(), ["almendras", "mix", "nueces", "pistachos"]);

        let almendras = fixture.product("almendras")?;

        assert_eq!(almendras.name(), "Almendras");
        assert_eq!(almendras.total_stock(), 10);
        assert_eq!(almendras.primary_image_url(), "/uploads/almendras.jpg");
        assert_eq!(
            almendras.tier(Weight::Grams250).map(|tier| tier.price()),
            Some(3_750)
        );

        Ok(())
    }

    #[test]
    fn fixture_product_not_found_returns_error() -> TestResult {
        let fixture = Fixture::from_set("catalogo")?;

        assert!(matches!(
            fixture.product("avellanas"),
            Err(FixtureError::ProductNotFound(key)) if key == "avellanas"
        ));

        Ok(())
    }

    #[test]
    fn fixture_invalid_draft_reports_every_field() -> TestResult {
        let fixture = Fixture::from_set("invalido")?;

        let Err(FixtureError::Invalid { name, source }) = fixture.product("sin_precio") else {
            return Err("invalid fixture should not derive".into());
        };

        assert_eq!(name, "sin_precio");
        assert!(source.has_field(ProductField::Name));
        assert!(source.has_field(ProductField::PricePerKilo));
        assert!(source.has_field(ProductField::Images));
        assert!(source.has_field(ProductField::Discount));

        Ok(())
    }

    #[test]
    fn fixture_missing_file_returns_io_error() {
        let result = Fixture::from_set("does-not-exist");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }

    #[test]
    fn fixture_rejects_malformed_yaml() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(dir.path(), "broken", "products:\n  a: [not, a, draft]\n")?;

        let result = Fixture::with_base_path(dir.path())
            .load_products("broken")
            .map(|_| ());

        assert!(matches!(result, Err(FixtureError::Yaml(_))));

        Ok(())
    }
}
