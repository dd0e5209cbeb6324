//! Per-call charge calculation.

use rust_decimal::Decimal;

use crate::core::discount;
use crate::domain::model::Call;

/// Currency units per minute per zone multiplier unit.
pub const BASE_RATE: u32 = 1100;

/// Factor applied to discounted calls (30% off).
pub fn discount_factor() -> Decimal {
    Decimal::new(7, 1)
}

/// Charge for one call, unrounded.
pub fn charge(call: &Call) -> Decimal {
    let mut amount = Decimal::from(BASE_RATE)
        * Decimal::from(call.duration_minutes)
        * Decimal::from(call.zone.multiplier());

    if discount::applies(call.start_hour, call.date) {
        amount *= discount_factor();
    }
    amount
}

/// Sum of [`charge`] over `calls`.
pub fn total_charge<'a>(calls: impl IntoIterator<Item = &'a Call>) -> Decimal {
    calls.into_iter().map(charge).sum()
}
