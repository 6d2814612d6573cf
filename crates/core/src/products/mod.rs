//! Products
//!
//! A product is sold in weight tiers. Admins submit a [`ProductDraft`] (or a [`ProductPatch`] for
//! an existing product); [`derive`] validates it and computes every derived field, so a
//! [`Product`] is always internally consistent:
//!
//! - each tier price is `round(price_per_kilo * grams / 1000)`,
//! - `total_stock` is the sum of the tier stock,
//! - `primary_image_url` is the flagged image, or the first one,
//! - `category` is the first entry of `categories`.

use serde::{Deserialize, Serialize};

use crate::{pricing::discounted_price, weights::Weight};

pub mod categories;
mod derive;
pub mod images;
pub mod tiers;
pub mod validation;

pub use categories::Categories;
pub use derive::{derive, merge, update};
pub use images::{MAX_IMAGES, ProductImage, primary_image};
pub use tiers::{TierDraft, WeightTier};
pub use validation::{ProductField, ValidationError, ValidationErrors};

/// A fully derived product record, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    name: String,
    description: String,
    price_per_kilo: u64,
    tiers: Vec<WeightTier>,
    total_stock: u64,
    images: Vec<ProductImage>,
    primary_image_url: String,
    discount: u8,
    category: String,
    categories: Categories,
}

impl Product {
    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price of one kilo, the source of every tier price
    pub fn price_per_kilo(&self) -> u64 {
        self.price_per_kilo
    }

    /// Weight tiers in submission order
    pub fn tiers(&self) -> &[WeightTier] {
        &self.tiers
    }

    /// Sum of the stock of every tier
    pub fn total_stock(&self) -> u64 {
        self.total_stock
    }

    /// Product images
    pub fn images(&self) -> &[ProductImage] {
        &self.images
    }

    /// URL of the image shown in listings
    pub fn primary_image_url(&self) -> &str {
        &self.primary_image_url
    }

    /// Discount percentage, `0..=100`
    pub fn discount(&self) -> u8 {
        self.discount
    }

    /// Canonical category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Every category the product is listed under, canonical first
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The tier for `weight`, if the product is sold in that size.
    pub fn tier(&self, weight: Weight) -> Option<&WeightTier> {
        self.tiers.iter().find(|tier| tier.weight() == weight)
    }

    /// Whether any tier has stock.
    pub fn in_stock(&self) -> bool {
        self.total_stock > 0
    }

    /// The image shown in listings.
    pub fn primary_image(&self) -> Option<&ProductImage> {
        primary_image(&self.images)
    }

    /// Tier price after the product discount.
    pub fn discounted_tier_price(&self, weight: Weight) -> Option<u64> {
        self.tier(weight)
            .map(|tier| discounted_price(tier.price(), self.discount))
    }

    /// Lowest discounted price among the tiers with stock, shown as "desde" in listings.
    pub fn starting_price(&self) -> Option<u64> {
        self.tiers
            .iter()
            .filter(|tier| tier.is_available())
            .map(|tier| discounted_price(tier.price(), self.discount))
            .min()
    }

    /// Whether the product is listed under `category`, ignoring case.
    pub fn belongs_to(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|candidate| categories::same_category(candidate, category))
    }
}

/// An unvalidated product submission.
///
/// Numeric fields are signed so out-of-range input is reported by validation rather than
/// failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    /// Product name
    pub name: String,

    /// Product description
    pub description: String,

    /// Price of one kilo
    pub price_per_kilo: i64,

    /// Weight tiers with their stock
    pub tiers: Vec<TierDraft>,

    /// Uploaded images, at most [`MAX_IMAGES`]
    pub images: Vec<ProductImage>,

    /// Discount percentage
    pub discount: i64,

    /// Canonical category, used when `categories` is absent
    pub category: String,

    /// Category memberships; the first entry becomes the canonical category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price_per_kilo: i64::try_from(product.price_per_kilo).unwrap_or(i64::MAX),
            tiers: product.tiers.iter().map(TierDraft::from).collect(),
            images: product.images.clone(),
            discount: i64::from(product.discount),
            category: product.category.clone(),
            categories: Some(product.categories.to_vec()),
        }
    }
}

/// A partial update of an existing product. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New price per kilo; every tier price is recomputed from it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_kilo: Option<i64>,

    /// Replacement tier list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<TierDraft>>,

    /// Replacement image list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ProductImage>>,

    /// New discount percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,

    /// New canonical category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Replacement category list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl ProductPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
