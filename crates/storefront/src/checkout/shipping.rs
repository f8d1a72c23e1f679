//! Cart shipping preview.

use grasshopper_core::shipping::{
    DEFAULT_FLAT_RATE, Weight, flat_rate, product_weight, ups_ground_cost,
};
use grasshopper_core::{CatalogObjectId, Cents, UsState};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::{instrument, warn};

use super::{CartItem, shipping_names};
use crate::error::AppError;
use crate::square::SquareClient;

/// Product and variation names for a line, or `None` when a lookup fails
/// or the catalog has no such variation.
pub(super) async fn lookup_names(
    square: &SquareClient,
    variation_id: &CatalogObjectId,
) -> Option<(String, String)> {
    match shipping_names(square, variation_id).await {
        Ok(names) => names,
        Err(e) => {
            warn!(error = %e, %variation_id, "Error fetching product for shipping");
            None
        }
    }
}

/// Flat-rate charge for `quantity` units of a variation.
pub(super) async fn line_flat_rate(
    square: &SquareClient,
    variation_id: &CatalogObjectId,
    quantity: u32,
) -> Cents {
    let per_unit = lookup_names(square, variation_id)
        .await
        .map_or(DEFAULT_FLAT_RATE, |(product, variation)| {
            flat_rate(&product, &variation)
        });
    per_unit * quantity
}

/// Units a preview line counts for.
///
/// Previews are not bound by the checkout limit of 100 units: any positive
/// whole number, or a string holding one, is taken as given and everything
/// else counts as a single unit.
fn quote_quantity(raw: &serde_json::Value) -> u32 {
    let n = match raw {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    n.filter(|&n| n > 0)
        .map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Body of `POST /api/calculate-shipping`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    /// Charge in cents.
    pub shipping_amount: Cents,
    /// Set when a destination state was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_weight_lbs: Option<f64>,
}

/// Shipping for a cart.
///
/// Without a destination this is the flat-rate sum used by hosted
/// checkout; with one it is the UPS zone charge a direct payment will be
/// billed. A line whose product cannot be looked up is charged the default
/// flat rate (or weighed as such).
///
/// # Errors
///
/// Returns `BadRequest` when the cart is empty.
#[instrument(skip(square, items), fields(items = items.len()))]
pub async fn quote_shipping(
    square: &SquareClient,
    items: &[CartItem],
    state: Option<UsState>,
) -> Result<ShippingQuote, AppError> {
    if items.is_empty() {
        return Err(AppError::BadRequest("No items provided".to_string()));
    }

    let mut flat = Cents::ZERO;
    let mut weight = Weight::ZERO;
    for item in items {
        let quantity = quote_quantity(&item.quantity);
        let names = match item
            .variation_id
            .as_deref()
            .map(str::trim)
            .map(CatalogObjectId::parse)
        {
            Some(Ok(id)) => lookup_names(square, &id).await,
            _ => None,
        };

        match names {
            Some((product, variation)) => {
                flat += flat_rate(&product, &variation) * quantity;
                weight = weight + product_weight(&product, &variation) * quantity;
            }
            None => {
                flat += DEFAULT_FLAT_RATE * quantity;
                weight = weight + product_weight("", "") * quantity;
            }
        }
    }

    Ok(match state {
        Some(state) => ShippingQuote {
            shipping_amount: ups_ground_cost(weight, &state),
            total_weight_lbs: weight.lbs().to_f64(),
        },
        None => ShippingQuote {
            shipping_amount: flat,
            total_weight_lbs: None,
        },
    })
}
