//! Shipping quotes without a cart.
//!
//! ```bash
//! gh-cli quote --weight 2.5 --state NC
//! gh-cli quote --product "B&B Sunday Shampoo" --variation Liter
//! ```

use grasshopper_core::UsState;
use grasshopper_core::shipping::{
    DEFAULT_FLAT_RATE, STANDARD_VARIATION, Weight, lookup_flat_rate, product_weight,
    ups_ground_cost, zone_for_state,
};
use rust_decimal::Decimal;

use super::CliError;

/// UPS Ground charge for a weight to a state.
///
/// # Errors
///
/// Returns an error for a negative weight or a blank state.
pub fn ups(lbs: Decimal, state: &str) -> Result<String, CliError> {
    if lbs.is_sign_negative() {
        return Err(CliError::InvalidArgument(format!("weight must not be negative: {lbs}")));
    }
    let state = UsState::parse(state)
        .ok_or_else(|| CliError::InvalidArgument("state is required".to_string()))?;
    let zone = zone_for_state(&state);
    let cost = ups_ground_cost(Weight::from_lbs(lbs), &state);
    Ok(format!("UPS Ground to {state} ({zone}), {lbs} lb: {cost}"))
}

/// Flat rate and estimated weight for a product variation.
#[must_use]
pub fn flat(product: &str, variation: Option<&str>) -> String {
    let variation = variation.unwrap_or(STANDARD_VARIATION);
    let weight = product_weight(product, variation);
    match lookup_flat_rate(product, variation) {
        Some(rate) => format!("{product} ({variation}): {rate} per unit, about {weight}"),
        None => format!(
            "{product} ({variation}) is not in the rate table; charged the default {DEFAULT_FLAT_RATE} per unit, about {weight}"
        ),
    }
}
