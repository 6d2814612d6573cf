//! Pricing
//!
//! Tier prices are derived from the price per kilo and rounded half away from zero, so
//! `2497.5` becomes `2498`. Discounts use the same rounding on the discounted amount.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};

use crate::weights::Weight;

/// Currency every price in the shop is expressed in.
pub const CURRENCY: &iso::Currency = iso::CLP;

const GRAMS_PER_KILO: u32 = 1000;

/// Price of a weight tier for the given price per kilo.
pub fn tier_price(price_per_kilo: u64, weight: Weight) -> u64 {
    let scaled = Decimal::from(price_per_kilo) * Decimal::from(weight.grams())
        / Decimal::from(GRAMS_PER_KILO);

    // A tier never weighs more than a kilo, so the price never exceeds the price per kilo.
    round(scaled).to_u64().unwrap_or(price_per_kilo)
}

/// Price after taking `discount` percent off. Percentages above 100 are treated as 100.
pub fn discounted_price(price: u64, discount: u8) -> u64 {
    if discount == 0 {
        return price;
    }

    let percent = Percentage::from(f64::from(discount.min(100)) / 100.0);

    let amount = round((percent * Decimal::ONE) * Decimal::from(price))
        .to_u64()
        .unwrap_or(price);

    price.saturating_sub(amount)
}

/// Format an amount as money, e.g. `$15.000`.
pub fn format_price(amount: u64) -> String {
    let minor = i64::try_from(amount).unwrap_or(i64::MAX);

    Money::from_minor(minor, CURRENCY).to_string()
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
