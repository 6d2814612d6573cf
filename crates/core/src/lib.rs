//! Frutos
//!
//! Pricing, product derivation and shopping cart engine for the Frutos Secos Premium storefront.
//!
//! Products are sold by weight. A single price per kilo drives the price of every weight tier,
//! and the cart keeps one line per product and weight.

pub mod cart;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod weights;
