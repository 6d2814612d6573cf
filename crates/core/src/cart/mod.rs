//! Cart
//!
//! The cart is an explicit state machine: [`reduce`] takes a [`CartState`] and a [`CartAction`]
//! and returns the next state. Lines are keyed by product and weight, and both cart totals are
//! recomputed from the full line list after every transition.

use serde::Serialize;

use crate::{
    products::Product,
    weights::{Weight, grams_label},
};

pub mod controls;
pub mod persistence;
mod reducer;
pub mod summary;

pub use persistence::{CART_STORAGE_KEY, DEFAULT_STOCK_CEILING, LoadOutcome, from_json, to_json};
pub use reducer::{CartAction, reduce};

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    /// Product identifier
    pub product_id: String,

    /// Pack size in grams
    pub weight: u32,
}

impl LineKey {
    /// Create a key for a product and weight.
    pub fn new(product_id: impl Into<String>, weight: impl Into<u32>) -> Self {
        Self {
            product_id: product_id.into(),
            weight: weight.into(),
        }
    }
}

/// A product selection to add to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    /// Product identifier
    pub product_id: String,

    /// Product name at add time
    pub name: String,

    /// Unit price at add time
    pub price: u64,

    /// Pack size in grams
    pub weight: u32,

    /// Packs to add
    pub quantity: u32,

    /// Image URL at add time
    pub image: String,

    /// Stock of the tier at add time
    pub stock: u32,
}

impl CartItem {
    /// Snapshot a product tier as a cart selection.
    ///
    /// The unit price is the discounted tier price. Returns `None` when the product is not sold in
    /// `weight`.
    pub fn from_product(
        product_id: impl Into<String>,
        product: &Product,
        weight: Weight,
        quantity: u32,
    ) -> Option<Self> {
        let tier = product.tier(weight)?;

        Some(Self {
            product_id: product_id.into(),
            name: product.name().to_string(),
            price: product.discounted_tier_price(weight)?,
            weight: weight.grams(),
            quantity,
            image: product.primary_image_url().to_string(),
            stock: tier.stock(),
        })
    }

    /// Key of the line this item lands in.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.weight)
    }
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    product_id: String,
    name: String,
    price: u64,
    weight: u32,
    quantity: u32,
    image: String,
    total: u64,
    stock: u32,
}

impl CartLine {
    /// Create a line from a selection. Quantity is at least one.
    pub fn new(item: CartItem) -> Self {
        let CartItem {
            product_id,
            name,
            price,
            weight,
            quantity,
            image,
            stock,
        } = item;

        let mut line = Self {
            product_id,
            name,
            price,
            weight,
            quantity: 0,
            image,
            total: 0,
            stock,
        };

        line.set_quantity(quantity);

        line
    }

    /// Product identifier
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price captured when the line was created
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Pack size in grams
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Shop label of the pack size
    pub fn weight_label(&self) -> String {
        grams_label(self.weight)
    }

    /// Packs in the cart
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Image URL
    pub fn image(&self) -> &str {
        &self.image
    }

    /// `price * quantity`
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Stock ceiling captured when the line was created
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Key of the line
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.weight)
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.weight == key.weight
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
        self.total = self.price.saturating_mul(u64::from(self.quantity));
    }
}

/// The cart: its lines plus totals derived from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<CartLine>,
    total_items: u64,
    total_amount: u64,
}

impl CartState {
    /// An empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a cart from its persisted JSON, dropping malformed entries.
    ///
    /// Returns the cart and the number of entries that were dropped.
    pub fn load(raw: &str) -> (Self, usize) {
        let LoadOutcome { lines, dropped } = from_json(raw);

        (reduce(Self::new(), CartAction::Load(lines)), dropped)
    }

    /// Cart lines in insertion order
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Sum of every line quantity
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Sum of every line total
    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for `key`, if present.
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.items.iter().find(|line| line.matches(key))
    }

    /// Apply an action, returning the next state.
    #[must_use]
    pub fn apply(self, action: CartAction) -> Self {
        reduce(self, action)
    }

    /// Serialize the lines for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        to_json(&self.items)
    }

    fn with_items(items: Vec<CartLine>) -> Self {
        let total_items = items.iter().map(|line| u64::from(line.quantity)).sum();

        let total_amount = items
            .iter()
            .fold(0_u64, |acc, line| acc.saturating_add(line.total));

        Self {
            items,
            total_items,
            total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::products::{ProductDraft, ProductImage, TierDraft, derive};

    use super::*;

    #[test]
    fn line_total_follows_quantity() {
        let line = CartLine::new(CartItem {
            product_id: "p1".to_string(),
            name: "Almendras".to_string(),
            price: 3_750,
            weight: 250,
            quantity: 0,
            image: String::new(),
            stock: 10,
        });

        assert_eq!(line.quantity(), 1);
        assert_eq!(line.total(), 3_750);
        assert_eq!(line.weight_label(), "250g");
    }

    #[test]
    fn item_from_product_snapshots_discounted_tier() -> TestResult {
        let product = derive(ProductDraft {
            name: "Pistachos".to_string(),
            description: "Pistachos tostados".to_string(),
            price_per_kilo: 30_000,
            tiers: vec![TierDraft::new(Weight::Grams500, 4)],
            images: vec![ProductImage::new("/uploads/pistachos.jpg", Timestamp::UNIX_EPOCH)],
            discount: 20,
            category: "Pistachos".to_string(),
            categories: None,
        })?;

        let item = CartItem::from_product("p9", &product, Weight::Grams500, 2)
            .ok_or("product should be sold in 500g")?;

        assert_eq!(item.price, 12_000);
        assert_eq!(item.stock, 4);
        assert_eq!(item.weight, 500);
        assert_eq!(item.image, "/uploads/pistachos.jpg");
        assert_eq!(item.key(), LineKey::new("p9", Weight::Grams500));

        assert!(CartItem::from_product("p9", &product, Weight::Kilo, 1).is_none());

        Ok(())
    }
}
