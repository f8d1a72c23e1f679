//! Square-hosted checkout links.
//!
//! Link orders reference catalog variations directly, so Square applies its
//! own catalog prices. Only shipping is added here, as a flat-rate service
//! charge; pickup links carry no shipping and ask for no address.

use grasshopper_core::{Cents, LocationId, PhoneNumber};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::shipping::line_flat_rate;
use super::{CartItem, LineRequest, rejected, safe_string, validate_lines};
use crate::error::AppError;
use crate::services::{EmailLine, Mailer, PickupRequestEmail};
use crate::square::{
    CheckoutOptions, CreatePaymentLinkRequest, NewOrder, OrderLineItem,
    OrderServiceCharge, PrePopulatedData, SquareClient, SquareError,
};

const CHECKOUT_FAILED: &str = "Failed to create checkout";
const PICKUP_FAILED: &str = "Failed to create pickup checkout";

/// Body of `POST /api/checkout` and `POST /api/checkout-pickup`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CartItem>,
    /// Required for pickup.
    pub phone: Option<String>,
}

/// Body of `POST /api/checkout-quick`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuickCheckoutRequest {
    pub variation_id: Option<String>,
    /// Defaults to one.
    pub quantity: Option<serde_json::Value>,
}

/// A hosted checkout URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLink {
    pub checkout_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

fn idempotency_key(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

/// Location for a shipping link; an account without one is a client-facing
/// 400, matching what the browser shows for a misconfigured shop.
async fn link_location(square: &SquareClient) -> Result<LocationId, AppError> {
    square.location_id().await.map_err(|e| match e {
        SquareError::NoLocation => AppError::BadRequest("No Square location found".to_string()),
        other => AppError::failed(CHECKOUT_FAILED, other),
    })
}

/// A shipping link for validated lines.
async fn shipping_link(
    square: &SquareClient,
    prefix: &str,
    lines: &[LineRequest],
) -> Result<CheckoutLink, AppError> {
    let location_id = link_location(square).await?;

    let mut shipping = Cents::ZERO;
    for line in lines {
        shipping += line_flat_rate(square, &line.variation_id, line.quantity).await;
    }

    let request = CreatePaymentLinkRequest {
        idempotency_key: idempotency_key(prefix),
        order: NewOrder {
            location_id: location_id.to_string(),
            line_items: lines
                .iter()
                .map(|l| OrderLineItem::catalog(l.variation_id.as_str(), l.quantity))
                .collect(),
            service_charges: vec![OrderServiceCharge::subtotal_phase("Shipping", shipping)],
            discounts: Vec::new(),
            fulfillments: Vec::new(),
        },
        checkout_options: CheckoutOptions::storefront(true),
        pre_populated_data: None,
    };

    let link = square
        .create_payment_link(&request)
        .await
        .map_err(|e| match e {
            SquareError::Api { .. } | SquareError::MissingField(_) => {
                tracing::error!(error = %e, "Checkout error");
                AppError::BadRequest(CHECKOUT_FAILED.to_string())
            }
            other => AppError::failed(CHECKOUT_FAILED, other),
        })?;
    info!(shipping = %shipping, lines = lines.len(), "Created checkout link");

    Ok(CheckoutLink {
        checkout_url: link.url,
        message: None,
    })
}

/// Hosted checkout for the whole cart, shipping charged at flat rates.
///
/// # Errors
///
/// Returns `BadRequest` for an empty or malformed cart, a shop without a
/// location, or a link Square refuses.
#[instrument(skip_all, fields(items = req.items.len()))]
pub async fn create_checkout(
    square: &SquareClient,
    req: &CheckoutRequest,
) -> Result<CheckoutLink, AppError> {
    if req.items.is_empty() {
        return Err(AppError::BadRequest("No items provided".to_string()));
    }
    let lines = validate_lines(&req.items, "Invalid item payload")?;
    shipping_link(square, "checkout", &lines).await
}

/// "Buy now" for a single variation.
///
/// # Errors
///
/// As [`create_checkout`].
#[instrument(skip_all)]
pub async fn quick_checkout(
    square: &SquareClient,
    req: &QuickCheckoutRequest,
) -> Result<CheckoutLink, AppError> {
    let item = CartItem {
        variation_id: req.variation_id.clone(),
        quantity: req.quantity.clone().unwrap_or_else(|| serde_json::Value::from(1)),
        ..CartItem::default()
    };
    let line = item
        .validate()
        .ok_or_else(|| AppError::BadRequest("Invalid item payload".to_string()))?;
    shipping_link(square, "quick", &[line]).await
}

/// Hosted checkout for local pickup: no shipping, no address, the buyer's
/// phone pre-filled. The shop owner is e-mailed the link.
///
/// # Errors
///
/// Returns `BadRequest` for an empty or malformed cart, a missing phone
/// number, or a link Square refuses (with Square's message), and `Failed`
/// when Square cannot be reached.
#[instrument(skip_all, fields(items = req.items.len()))]
pub async fn pickup_checkout(
    square: &SquareClient,
    mailer: &Mailer,
    req: &CheckoutRequest,
) -> Result<CheckoutLink, AppError> {
    if req.items.is_empty() {
        return Err(AppError::BadRequest("No items provided".to_string()));
    }
    let phone = req
        .phone
        .as_deref()
        .and_then(|p| PhoneNumber::parse(p).ok())
        .ok_or_else(|| AppError::BadRequest("Valid phone number required".to_string()))?;
    let lines = validate_lines(&req.items, "Invalid item payload")?;

    let location_id = square
        .location_id()
        .await
        .map_err(|e| AppError::failed(PICKUP_FAILED, e))?;

    let request = CreatePaymentLinkRequest {
        idempotency_key: idempotency_key("pickup"),
        order: NewOrder {
            location_id: location_id.to_string(),
            line_items: lines
                .iter()
                .map(|l| OrderLineItem::catalog(l.variation_id.as_str(), l.quantity))
                .collect(),
            service_charges: Vec::new(),
            discounts: Vec::new(),
            fulfillments: Vec::new(),
        },
        checkout_options: CheckoutOptions::storefront(false),
        pre_populated_data: Some(PrePopulatedData {
            buyer_phone_number: phone.to_e164(),
        }),
    };
    let link = square
        .create_payment_link(&request)
        .await
        .map_err(|e| rejected(e, CHECKOUT_FAILED, PICKUP_FAILED))?;
    info!(lines = lines.len(), "Created pickup checkout link");

    let items: Vec<EmailLine> = req
        .items
        .iter()
        .zip(&lines)
        .map(|(item, line)| EmailLine {
            name: Some(safe_string(item.name.as_deref(), 120))
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Item".to_string()),
            quantity: line.quantity,
            unit_price: item
                .price
                .and_then(Decimal::from_f64)
                .map(Cents::from_dollars)
                .unwrap_or_default(),
        })
        .collect();
    mailer
        .pickup_requested(&PickupRequestEmail {
            phone: phone.as_display().to_string(),
            subtotal: items.iter().map(EmailLine::line_total).sum(),
            items,
            checkout_url: link.url.clone(),
        })
        .await;

    Ok(CheckoutLink {
        checkout_url: link.url,
        message: Some("Pickup order created"),
    })
}
