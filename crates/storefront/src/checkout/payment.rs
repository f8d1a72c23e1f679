//! Direct card payment.
//!
//! The browser tokenizes the card with the Web Payments SDK and posts the
//! token with the cart. Everything charged is recomputed here from the
//! catalog: sale prices, UPS shipping, the promo discount and sales tax.
//! The Square order carries those amounts as ad-hoc priced lines and
//! service charges, and the payment is taken for whatever total Square
//! computes for that order.

use grasshopper_core::pricing::{TAX_LABEL, sale_price, sales_tax};
use grasshopper_core::promo::{DiscountBreakdown, compute_discount};
use grasshopper_core::shipping::{STANDARD_VARIATION, Weight, product_weight, ups_ground_cost};
use grasshopper_core::{Cents, Email, OrderId, OrderType, UsState};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::{CartItem, LineRequest, rejected, safe_string, validate_lines};
use crate::error::{AppError, add_breadcrumb};
use crate::promo::{PromoOutcome, resolve_promo_code};
use crate::services::{EmailLine, Mailer, OrderEmail, ShipTo};
use crate::square::{
    Address, CreateOrderRequest, CreatePaymentRequest, Money, NewOrder, OrderDiscount,
    OrderFulfillment, OrderLineItem, OrderServiceCharge, Recipient, ShipmentDetails, SquareClient,
};

/// Source id the browser sends for a fully discounted order.
pub const FREE_ORDER_SOURCE: &str = "FREE_ORDER";

/// Payment id recorded for a free order.
pub const FREE_PAYMENT_ID: &str = "FREE";

const PROCESSING_FAILED: &str = "Payment processing failed";

/// Longest client idempotency key accepted.
const MAX_IDEMPOTENCY_KEY: usize = 36;

/// Shipping form fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub apt: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl ShippingAddress {
    fn display_name(&self) -> String {
        format!(
            "{} {}",
            safe_string(self.first_name.as_deref(), 60),
            safe_string(self.last_name.as_deref(), 60)
        )
        .trim()
        .to_string()
    }

    fn apt(&self) -> Option<String> {
        Some(safe_string(self.apt.as_deref(), 120)).filter(|a| !a.is_empty())
    }

    fn state_code(&self) -> String {
        safe_string(self.state.as_deref(), 2).to_uppercase()
    }

    fn customer_email(&self) -> Option<Email> {
        let raw = safe_string(self.email.as_deref(), Email::MAX_LENGTH);
        if raw.is_empty() {
            return None;
        }
        Email::parse(&raw)
            .inspect_err(|e| warn!(error = %e, "Ignoring unusable customer email"))
            .ok()
    }

    fn to_fulfillment(&self) -> OrderFulfillment {
        OrderFulfillment {
            fulfillment_type: "SHIPMENT",
            state: "PROPOSED",
            shipment_details: ShipmentDetails {
                recipient: Recipient {
                    display_name: self.display_name(),
                    email_address: self.customer_email().map(String::from),
                    address: Address {
                        address_line_1: safe_string(self.street.as_deref(), 120),
                        address_line_2: self.apt(),
                        locality: safe_string(self.city.as_deref(), 80),
                        administrative_district_level_1: self.state_code(),
                        postal_code: safe_string(self.zip.as_deref(), 10),
                        country: "US",
                    },
                },
            },
        }
    }

    fn to_ship_to(&self) -> ShipTo {
        ShipTo {
            name: self.display_name(),
            street: safe_string(self.street.as_deref(), 120),
            apt: self.apt(),
            city: safe_string(self.city.as_deref(), 80),
            state: self.state_code(),
            zip: safe_string(self.zip.as_deref(), 10),
        }
    }
}

/// Body of `POST /api/process-payment`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Card token, or [`FREE_ORDER_SOURCE`].
    pub source_id: Option<String>,
    pub items: Vec<CartItem>,
    pub order_type: Option<String>,
    pub phone: Option<String>,
    pub shipping_address: Option<ShippingAddress>,
    pub promo_code: Option<String>,
    /// The browser's own discount figure; compared, never trusted.
    pub discount_cents: Option<f64>,
    /// The browser's own tax figure; compared, never trusted.
    pub tax_cents: Option<f64>,
    pub idempotency_key: Option<String>,
}

/// Response of a successful payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub success: bool,
    pub payment_id: String,
    pub order_id: String,
    pub receipt_url: Option<String>,
}

/// A cart line priced from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PricedLine {
    display_name: String,
    quantity: u32,
    unit_price: Cents,
    weight: Weight,
}

/// Seed shared by the order and payment idempotency keys.
///
/// A client key is reused when it is short and URL-safe so that a retried
/// submission maps onto the same Square order and payment.
fn idempotency_seed(client_key: Option<&str>) -> String {
    client_key
        .map(str::trim)
        .filter(|k| {
            !k.is_empty()
                && k.len() <= MAX_IDEMPOTENCY_KEY
                && k.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_owned)
}

/// How far a client-side figure is from the server's, in whole cents.
fn client_drift(client: Option<f64>, server: Cents) -> Option<i64> {
    let client = Decimal::from_f64(client?)?.round().to_i64()?;
    let drift = client.saturating_sub(server.as_i64());
    (drift.abs() > 1).then_some(drift)
}

/// Price every line from the catalog, in cart order.
async fn price_lines(
    square: &SquareClient,
    items: &[CartItem],
    lines: Vec<LineRequest>,
) -> Result<Vec<PricedLine>, AppError> {
    let mut priced = Vec::with_capacity(lines.len());
    for (line, item) in lines.into_iter().zip(items) {
        let variation = square
            .catalog_object(&line.variation_id)
            .await
            .map_err(|e| AppError::failed(PROCESSING_FAILED, e))?;
        let Some(data) = variation.as_ref().and_then(|v| v.item_variation_data.as_ref()) else {
            return Err(AppError::BadRequest("Invalid variation selected".to_string()));
        };
        let Some(item_id) = data.item_id.as_deref() else {
            return Err(AppError::BadRequest(
                "Invalid catalog relationship for variation".to_string(),
            ));
        };

        let parent = square
            .catalog_object(&grasshopper_core::CatalogObjectId::new_unchecked(item_id))
            .await
            .map_err(|e| AppError::failed(PROCESSING_FAILED, e))?;
        let product_name = parent
            .as_ref()
            .and_then(|p| p.item_data.as_ref())
            .and_then(|d| d.name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| Some(safe_string(item.name.as_deref(), 120)).filter(|n| !n.is_empty()))
            .unwrap_or_else(|| "Product".to_string());
        let variation_name = Some(safe_string(data.name.as_deref(), 80))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| STANDARD_VARIATION.to_string());

        let Some(base_price) = data
            .price_money
            .as_ref()
            .map(Money::cents)
            .filter(|c| c.is_positive())
        else {
            return Err(AppError::BadRequest("Variation has invalid price".to_string()));
        };

        let display_name = if variation_name.eq_ignore_ascii_case(STANDARD_VARIATION) {
            product_name.clone()
        } else {
            format!("{product_name} - {variation_name}")
        };
        priced.push(PricedLine {
            weight: product_weight(&product_name, &variation_name),
            display_name,
            quantity: line.quantity,
            unit_price: sale_price(base_price),
        });
    }
    Ok(priced)
}

/// Price the cart, create the Square order and charge the card.
///
/// A free order (source [`FREE_ORDER_SOURCE`]) is only accepted when a
/// valid promo code brings Square's order total to zero; no payment is
/// created for it. Notification e-mails are sent after the charge and never
/// fail the request.
///
/// # Errors
///
/// Returns `BadRequest` for invalid input, a rejected promo code, or an
/// order or payment Square refuses (carrying Square's message), and
/// `Failed` when Square cannot be reached.
#[instrument(skip_all, fields(items = req.items.len()))]
pub async fn process_payment(
    square: &SquareClient,
    mailer: &Mailer,
    req: PaymentRequest,
) -> Result<PaymentReceipt, AppError> {
    let source_id = req
        .source_id
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_owned);
    let order_type = req
        .order_type
        .clone()
        .filter(|t| !t.is_empty())
        .map(OrderType::from);
    let (Some(source_id), Some(order_type)) = (source_id, order_type) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };
    if req.items.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    let lines = validate_lines(&req.items, "Invalid item payload")?;
    let priced = price_lines(square, &req.items, lines).await?;
    let subtotal: Cents = priced.iter().map(|l| l.unit_price * l.quantity).sum();

    let address = req.shipping_address.as_ref();
    let shipping = if order_type.is_pickup() {
        Cents::ZERO
    } else {
        let weight: Weight = priced.iter().map(|l| l.weight * l.quantity).sum();
        let state = UsState::parse_or_default(address.and_then(|a| a.state.as_deref()));
        ups_ground_cost(weight, &state)
    };

    let promo = match req.promo_code.as_deref().filter(|c| !c.is_empty()) {
        Some(raw) => match resolve_promo_code(square, raw).await {
            PromoOutcome::Valid { code, discount } => Some((code, discount)),
            PromoOutcome::Invalid(message) => {
                return Err(AppError::BadRequest(message.to_string()));
            }
        },
        None => None,
    };
    let breakdown = promo
        .as_ref()
        .map_or_else(DiscountBreakdown::default, |(_, discount)| {
            compute_discount(discount, subtotal, shipping)
        });
    if let Some(drift) = client_drift(req.discount_cents, breakdown.discount) {
        warn!(drift, server = %breakdown.discount, "Client discount mismatch ignored");
    }

    let tax = sales_tax(subtotal.saturating_sub(breakdown.product_discount));
    if let Some(drift) = client_drift(req.tax_cents, tax) {
        warn!(drift, server = %tax, "Client tax mismatch ignored");
    }

    let location_id = square
        .location_id()
        .await
        .map_err(|e| AppError::failed(PROCESSING_FAILED, e))?;

    let mut service_charges = Vec::new();
    if shipping.is_positive() {
        service_charges.push(OrderServiceCharge::subtotal_phase("Shipping", shipping));
    }
    if tax.is_positive() {
        service_charges.push(OrderServiceCharge::subtotal_phase(TAX_LABEL, tax));
    }
    let mut discounts = Vec::new();
    if breakdown.discount.is_positive() {
        discounts.push(OrderDiscount {
            name: promo
                .as_ref()
                .map_or_else(|| "Discount".to_string(), |(code, _)| code.clone()),
            amount_money: Money::usd(breakdown.discount),
            scope: "ORDER",
        });
    }
    let fulfillments = address
        .filter(|_| !order_type.is_pickup())
        .map(ShippingAddress::to_fulfillment)
        .into_iter()
        .collect();

    let seed = idempotency_seed(req.idempotency_key.as_deref());
    let kind = if order_type.is_pickup() { "pickup" } else { "shipping" };
    let order = square
        .create_order(&CreateOrderRequest {
            idempotency_key: format!("order-{kind}-{seed}"),
            order: NewOrder {
                location_id: location_id.to_string(),
                line_items: priced
                    .iter()
                    .map(|l| OrderLineItem::priced(&l.display_name, l.unit_price, l.quantity))
                    .collect(),
                service_charges,
                discounts,
                fulfillments,
            },
        })
        .await
        .map_err(|e| rejected(e, "Failed to create order", PROCESSING_FAILED))?;
    add_breadcrumb("checkout", "Order created", Some(&[("order_id", order.id.as_str())]));

    let order_total = order
        .total_money
        .as_ref()
        .map_or(Cents::ZERO, Money::cents);
    let is_free_source = source_id == FREE_ORDER_SOURCE;
    let can_use_free_order = is_free_source
        && promo.is_some()
        && breakdown.discount.is_positive()
        && order_total == Cents::ZERO;
    if is_free_source && !can_use_free_order {
        return Err(AppError::BadRequest("Invalid free order request".to_string()));
    }
    if !is_free_source && order_total == Cents::ZERO {
        return Err(AppError::BadRequest(
            "Order total is zero; retry with free order flow".to_string(),
        ));
    }

    let (payment_id, receipt_url) = if can_use_free_order {
        (FREE_PAYMENT_ID.to_string(), None)
    } else {
        let payment = square
            .create_payment(&CreatePaymentRequest {
                idempotency_key: format!("pay-{kind}-{seed}"),
                source_id,
                amount_money: Money::usd(order_total),
                order_id: order.id.clone(),
                location_id: location_id.to_string(),
            })
            .await
            .map_err(|e| rejected(e, "Payment failed", PROCESSING_FAILED))?;
        if payment.status.is_failed() {
            return Err(AppError::BadRequest("Payment failed".to_string()));
        }
        (payment.id, payment.receipt_url)
    };
    info!(order_id = %order.id, payment_id = %payment_id, total = %order_total, "Payment completed");

    let email = OrderEmail {
        items: priced
            .iter()
            .map(|l| EmailLine {
                name: l.display_name.clone(),
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect(),
        subtotal,
        shipping,
        tax,
        discount: breakdown.discount,
        total: order_total,
        order_id: OrderId::new_unchecked(order.id.clone()),
        payment_id: payment_id.clone(),
        is_free: can_use_free_order,
        order_type,
        phone: req.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()).map(str::to_owned),
        customer_email: address.and_then(ShippingAddress::customer_email),
        ship_to: address
            .filter(|_| !order_type.is_pickup())
            .map(ShippingAddress::to_ship_to),
        promo_code: promo.map(|(code, _)| code),
    };
    mailer.order_placed(&email).await;

    Ok(PaymentReceipt {
        success: true,
        payment_id,
        order_id: order.id,
        receipt_url,
    })
}
