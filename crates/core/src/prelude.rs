//! Frutos prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CART_STORAGE_KEY, CartAction, CartItem, CartLine, CartState, DEFAULT_STOCK_CEILING,
        LineKey, LoadOutcome,
        controls::{can_increment, decrement, increment},
        from_json, reduce,
        summary::render_summary,
        to_json,
    },
    fixtures::{Fixture, FixtureError},
    pricing::{CURRENCY, discounted_price, format_price, tier_price},
    products::{
        Categories, MAX_IMAGES, Product, ProductDraft, ProductField, ProductImage, ProductPatch,
        TierDraft, ValidationError, ValidationErrors, WeightTier, derive, merge, primary_image,
        update,
    },
    weights::{Weight, WeightError, grams_label},
};
