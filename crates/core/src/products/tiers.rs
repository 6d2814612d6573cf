//! Weight Tiers

use serde::{Deserialize, Serialize};

use crate::weights::Weight;

/// A derived weight tier of a product.
///
/// The price is always computed from the product's price per kilo and cannot be set by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTier {
    weight: Weight,
    price: u64,
    stock: u32,
}

impl WeightTier {
    pub(crate) fn new(weight: Weight, price: u64, stock: u32) -> Self {
        Self {
            weight,
            price,
            stock,
        }
    }

    /// Pack size
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Price of one pack
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Packs available
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Whether at least one pack is available.
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// A weight tier as submitted by an admin. Any price sent alongside it is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDraft {
    /// Pack size
    pub weight: Weight,

    /// Packs available; signed so negative input reaches validation.
    #[serde(default)]
    pub stock: i64,
}

impl TierDraft {
    /// Create a tier draft.
    pub fn new(weight: Weight, stock: i64) -> Self {
        Self { weight, stock }
    }
}

impl From<&WeightTier> for TierDraft {
    fn from(tier: &WeightTier) -> Self {
        Self {
            weight: tier.weight,
            stock: i64::from(tier.stock),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn draft_ignores_submitted_price() -> TestResult {
        let draft: TierDraft = serde_json::from_str(r#"{"weight":250,"stock":4,"price":1}"#)?;

        assert_eq!(draft, TierDraft::new(Weight::Grams250, 4));

        Ok(())
    }

    #[test]
    fn draft_from_tier_keeps_weight_and_stock() {
        let tier = WeightTier::new(Weight::Grams500, 7_500, 3);

        assert_eq!(TierDraft::from(&tier), TierDraft::new(Weight::Grams500, 3));
    }
}
