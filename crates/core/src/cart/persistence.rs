//! Cart Persistence
//!
//! The cart is stored as a JSON array of lines under [`CART_STORAGE_KEY`]. Loading is lossy but
//! safe: entries with a missing required field or a wrongly typed value are dropped, never
//! repaired, and a corrupt blob yields an empty cart instead of an error.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::cart::{CartItem, CartLine};

/// Storage key the cart lines are kept under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Stock ceiling assumed for persisted lines that carry no stock.
pub const DEFAULT_STOCK_CEILING: u32 = 9_999;

/// Lines recovered from storage, with a count of the entries that had to be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Well-formed lines, in stored order
    pub lines: Vec<CartLine>,

    /// Entries that were pruned. An unreadable blob counts as one.
    pub dropped: usize,
}

/// A stored line. `total` is not read back; it is recomputed from price and quantity.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLine {
    product_id: String,
    name: String,
    price: u64,
    weight: u32,
    quantity: u32,
    image: String,
    #[serde(default)]
    stock: Option<Value>,
}

impl From<StoredLine> for CartLine {
    fn from(stored: StoredLine) -> Self {
        let stock = stored
            .stock
            .as_ref()
            .and_then(Value::as_u64)
            .and_then(|stock| u32::try_from(stock).ok())
            .unwrap_or(DEFAULT_STOCK_CEILING);

        CartLine::new(CartItem {
            product_id: stored.product_id,
            name: stored.name,
            price: stored.price,
            weight: stored.weight,
            quantity: stored.quantity,
            image: stored.image,
            stock,
        })
    }
}

/// Serialize cart lines with every field, `total` and `stock` included.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(lines: &[CartLine]) -> Result<String, serde_json::Error> {
    serde_json::to_string(lines)
}

/// Read cart lines back from their stored JSON.
pub fn from_json(raw: &str) -> LoadOutcome {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) | Err(_) => {
            debug!("discarded unreadable cart blob");

            return LoadOutcome {
                lines: Vec::new(),
                dropped: 1,
            };
        }
    };

    let total = entries.len();

    let lines: Vec<CartLine> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<StoredLine>(entry).ok())
        .map(CartLine::from)
        .collect();

    let dropped = total - lines.len();

    if dropped > 0 {
        debug!(dropped, kept = lines.len(), "pruned malformed cart entries");
    }

    LoadOutcome { lines, dropped }
}
