//! Checkout flows.
//!
//! - [`payment::process_payment`] prices the cart server-side, creates a
//!   Square order and charges a Web Payments SDK token.
//! - [`links`] creates Square-hosted payment links (cart, quick buy,
//!   local pickup).
//! - [`shipping::quote_shipping`] previews the shipping charge for a cart.
//!
//! Every flow re-reads catalog prices and names from Square; client-sent
//! prices are only ever used for display in notification e-mails.

pub mod links;
pub mod payment;
pub mod shipping;

use grasshopper_core::CatalogObjectId;
use grasshopper_core::pricing::normalize_quantity;
use grasshopper_core::shipping::STANDARD_VARIATION;
use serde::Deserialize;

use crate::error::AppError;
use crate::square::{SquareClient, SquareError};

pub use links::{
    CheckoutLink, CheckoutRequest, QuickCheckoutRequest, create_checkout, pickup_checkout,
    quick_checkout,
};
pub use payment::{PaymentReceipt, PaymentRequest, ShippingAddress, process_payment};
pub use shipping::{ShippingQuote, quote_shipping};

/// A cart line as the browser sends it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartItem {
    pub variation_id: Option<String>,
    pub quantity: serde_json::Value,
    /// Display name; only trusted for e-mails.
    pub name: Option<String>,
    /// Unit price in dollars; only trusted for e-mails.
    pub price: Option<f64>,
}

/// A validated cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRequest {
    pub variation_id: CatalogObjectId,
    pub quantity: u32,
}

impl CartItem {
    /// The line, when the variation id is well-formed and the quantity is
    /// a whole number in `1..=100`.
    #[must_use]
    pub fn validate(&self) -> Option<LineRequest> {
        let quantity = normalize_quantity(&self.quantity)?;
        let raw = safe_string(self.variation_id.as_deref(), 64);
        let variation_id = CatalogObjectId::parse(&raw).ok()?;
        Some(LineRequest {
            variation_id,
            quantity,
        })
    }
}

/// Validate every line, failing with `error` on the first bad one.
fn validate_lines(items: &[CartItem], error: &str) -> Result<Vec<LineRequest>, AppError> {
    items
        .iter()
        .map(|item| {
            item.validate()
                .ok_or_else(|| AppError::BadRequest(error.to_string()))
        })
        .collect()
}

/// Trimmed and capped at `max` characters.
#[must_use]
pub fn safe_string(value: Option<&str>, max: usize) -> String {
    value.unwrap_or_default().trim().chars().take(max).collect()
}

/// Product and variation names of a catalog variation, as the shipping
/// tables key them.
///
/// `None` when the variation, its parent reference or the parent item is
/// missing.
///
/// # Errors
///
/// Returns an error if a catalog lookup fails.
pub async fn shipping_names(
    square: &SquareClient,
    variation_id: &CatalogObjectId,
) -> Result<Option<(String, String)>, SquareError> {
    let Some(variation) = square.catalog_object(variation_id).await? else {
        return Ok(None);
    };
    let Some(data) = variation.item_variation_data.as_ref() else {
        return Ok(None);
    };
    let variation_name = data
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| STANDARD_VARIATION.to_string());
    let Some(item_id) = data.item_id.as_deref() else {
        return Ok(None);
    };

    let parent = square
        .catalog_object(&CatalogObjectId::new_unchecked(item_id))
        .await?;
    let Some(parent) = parent else {
        return Ok(None);
    };
    let product_name = parent
        .item_data
        .as_ref()
        .and_then(|d| d.name.clone())
        .unwrap_or_default();
    Ok(Some((product_name, variation_name)))
}

/// Map a Square rejection to a 400 carrying Square's message (or
/// `fallback`), and anything else to a 500 with `catch_all`.
fn rejected(err: SquareError, fallback: &str, catch_all: &'static str) -> AppError {
    match err {
        SquareError::Api { detail, .. } => {
            AppError::BadRequest(detail.unwrap_or_else(|| fallback.to_string()))
        }
        SquareError::MissingField(_) => AppError::BadRequest(fallback.to_string()),
        other => AppError::failed(catch_all, other),
    }
}
