//! Weights

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when converting raw grams into a [`Weight`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightError {
    /// The value is not one of the tiers sold in the shop.
    #[error("unsupported weight: {0}g")]
    Unsupported(u32),
}

/// A purchasable pack size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Weight {
    /// 100 grams
    Grams100,

    /// 250 grams
    Grams250,

    /// 500 grams
    Grams500,

    /// 1 kilo
    Kilo,
}

impl Weight {
    /// Every tier, lightest first.
    pub const ALL: [Weight; 4] = [
        Weight::Grams100,
        Weight::Grams250,
        Weight::Grams500,
        Weight::Kilo,
    ];

    /// Weight in grams.
    pub const fn grams(self) -> u32 {
        match self {
            Weight::Grams100 => 100,
            Weight::Grams250 => 250,
            Weight::Grams500 => 500,
            Weight::Kilo => 1000,
        }
    }

    /// Label shown next to the price in the shop.
    pub const fn label(self) -> &'static str {
        match self {
            Weight::Grams100 => "100g",
            Weight::Grams250 => "250g",
            Weight::Grams500 => "500g",
            Weight::Kilo => "1kg",
        }
    }
}

impl TryFrom<u32> for Weight {
    type Error = WeightError;

    fn try_from(grams: u32) -> Result<Self, Self::Error> {
        Weight::ALL
            .into_iter()
            .find(|weight| weight.grams() == grams)
            .ok_or(WeightError::Unsupported(grams))
    }
}

impl From<Weight> for u32 {
    fn from(weight: Weight) -> Self {
        weight.grams()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for raw grams, used where a weight was not validated against the tier set.
pub fn grams_label(grams: u32) -> String {
    Weight::try_from(grams).map_or_else(|_| format!("{grams}g"), |weight| weight.to_string())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn try_from_known_grams() -> TestResult {
        assert_eq!(Weight::try_from(250)?, Weight::Grams250);
        assert_eq!(Weight::try_from(1000)?, Weight::Kilo);

        Ok(())
    }

    #[test]
    fn try_from_unknown_grams_errors() {
        assert_eq!(Weight::try_from(300), Err(WeightError::Unsupported(300)));
    }

    #[test]
    fn serializes_as_grams() -> TestResult {
        assert_eq!(serde_json::to_string(&Weight::Grams500)?, "500");

        let weight: Weight = serde_json::from_str("100")?;

        assert_eq!(weight, Weight::Grams100);

        Ok(())
    }

    #[test]
    fn deserializing_unsupported_grams_fails() {
        let result: Result<Weight, _> = serde_json::from_str("750");

        assert!(result.is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(Weight::Kilo.to_string(), "1kg");
        assert_eq!(grams_label(250), "250g");
        assert_eq!(grams_label(300), "300g");
    }
}
