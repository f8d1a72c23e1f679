//! Cart, promo and payment handlers.

use axum::Json;
use axum::extract::State;
use grasshopper_core::UsState;
use grasshopper_core::pickup::{PickupEligibility, check_pickup};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::checkout::{
    self, CartItem, CheckoutLink, CheckoutRequest, PaymentReceipt, PaymentRequest,
    QuickCheckoutRequest, ShippingQuote,
};
use crate::error::{AppError, Result};
use crate::extract::JsonBody;
use crate::promo::{PromoResponse, resolve_promo_code};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShippingQuoteRequest {
    pub items: Vec<CartItem>,
    /// Destination state; switches the quote to UPS zone pricing.
    pub state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PromoRequest {
    pub code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickupCheckRequest {
    /// String or number.
    pub zip_code: Option<Value>,
}

/// `POST /api/calculate-shipping`
#[instrument(skip_all)]
pub async fn calculate_shipping(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ShippingQuoteRequest>,
) -> Result<Json<ShippingQuote>> {
    let destination = req.state.as_deref().and_then(UsState::parse);
    checkout::quote_shipping(state.square(), &req.items, destination)
        .await
        .map(Json)
}

/// `POST /api/validate-promo`
///
/// Always 200; the body's `valid` flag carries the outcome.
#[instrument(skip_all)]
pub async fn validate_promo(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PromoRequest>,
) -> Json<PromoResponse> {
    let outcome = resolve_promo_code(state.square(), req.code.as_deref().unwrap_or_default()).await;
    Json(PromoResponse::from(&outcome))
}

/// `POST /api/process-payment`
#[instrument(skip_all)]
pub async fn process_payment(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PaymentRequest>,
) -> Result<Json<PaymentReceipt>> {
    checkout::process_payment(state.square(), state.mailer(), req)
        .await
        .map(Json)
}

/// `POST /api/checkout`
#[instrument(skip_all)]
pub async fn create_checkout(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CheckoutRequest>,
) -> Result<Json<CheckoutLink>> {
    checkout::create_checkout(state.square(), &req).await.map(Json)
}

/// `POST /api/checkout-quick`
#[instrument(skip_all)]
pub async fn quick_checkout(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<QuickCheckoutRequest>,
) -> Result<Json<CheckoutLink>> {
    checkout::quick_checkout(state.square(), &req).await.map(Json)
}

/// `POST /api/checkout-pickup`
#[instrument(skip_all)]
pub async fn pickup_checkout(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CheckoutRequest>,
) -> Result<Json<CheckoutLink>> {
    checkout::pickup_checkout(state.square(), state.mailer(), &req)
        .await
        .map(Json)
}

/// `POST /api/check-pickup`
pub async fn check_pickup_eligibility(
    JsonBody(req): JsonBody<PickupCheckRequest>,
) -> Result<Json<PickupEligibility>> {
    let zip = match req.zip_code {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    if zip.trim().is_empty() {
        return Err(AppError::BadRequest("Zip code required".to_string()));
    }
    Ok(Json(check_pickup(&zip)))
}
