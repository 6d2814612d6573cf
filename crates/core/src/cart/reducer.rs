//! Cart Reducer

use crate::cart::{CartItem, CartLine, CartState, LineKey};

/// A cart transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add a selection, merging into the line with the same key.
    ///
    /// A merge adds the quantities without checking the line's stock ceiling.
    Add(CartItem),

    /// Remove the line with this key. Unknown keys are ignored.
    Remove(LineKey),

    /// Set a line's quantity, floored at one. No stock ceiling is applied here; the +/- controls
    /// in [`crate::cart::controls`] enforce it. Unknown keys are ignored.
    SetQuantity {
        /// Line to update
        key: LineKey,
        /// Requested quantity; zero and negative values become one
        quantity: i64,
    },

    /// Remove every line.
    Clear,

    /// Replace the cart with previously persisted lines. Lines sharing a key are merged.
    Load(Vec<CartLine>),
}

/// Compute the next cart state. Every action is defined for every state; a no-match is a no-op.
pub fn reduce(state: CartState, action: CartAction) -> CartState {
    let mut items = state.items;

    match action {
        CartAction::Add(item) => merge_line(&mut items, CartLine::new(item)),
        CartAction::Remove(key) => items.retain(|line| !line.matches(&key)),
        CartAction::SetQuantity { key, quantity } => {
            if let Some(line) = items.iter_mut().find(|line| line.matches(&key)) {
                line.set_quantity(clamp_quantity(quantity));
            }
        }
        CartAction::Clear => items.clear(),
        CartAction::Load(lines) => {
            items = Vec::with_capacity(lines.len());

            for line in lines {
                merge_line(&mut items, line);
            }
        }
    }

    CartState::with_items(items)
}

fn merge_line(items: &mut Vec<CartLine>, line: CartLine) {
    let key = line.key();

    match items.iter_mut().find(|existing| existing.matches(&key)) {
        Some(existing) => {
            let quantity = existing.quantity.saturating_add(line.quantity);
            existing.set_quantity(quantity);
        }
        None => items.push(line),
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}
