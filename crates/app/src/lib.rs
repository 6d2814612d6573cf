//! Catalog services and cart sessions for the Frutos Secos Premium storefront.

pub mod config;
pub mod context;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
