//! Quantity Controls
//!
//! The storefront's +/- buttons. They enforce the stock ceiling captured on each line before
//! dispatching [`CartAction::SetQuantity`], which itself only floors at one.

use crate::cart::{CartAction, CartState, LineKey, reduce};

/// Whether the line can take one more pack without exceeding its stock ceiling.
pub fn can_increment(state: &CartState, key: &LineKey) -> bool {
    state
        .line(key)
        .is_some_and(|line| line.quantity() < line.stock())
}

/// Add one pack to a line, unless it already holds its full stock.
pub fn increment(state: CartState, key: &LineKey) -> CartState {
    if !can_increment(&state, key) {
        return state;
    }

    let Some(quantity) = state.line(key).map(|line| i64::from(line.quantity()) + 1) else {
        return state;
    };

    reduce(
        state,
        CartAction::SetQuantity {
            key: key.clone(),
            quantity,
        },
    )
}

/// Take one pack off a line, never going below one.
pub fn decrement(state: CartState, key: &LineKey) -> CartState {
    let Some(quantity) = state.line(key).map(|line| i64::from(line.quantity()) - 1) else {
        return state;
    };

    reduce(
        state,
        CartAction::SetQuantity {
            key: key.clone(),
            quantity,
        },
    )
}
