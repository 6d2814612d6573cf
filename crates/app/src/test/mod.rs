//! Shared test support.

pub(crate) mod helpers;
