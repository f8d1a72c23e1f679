//! Square REST API request and response models.
//!
//! Only the fields the storefront reads are modelled; everything else in
//! Square's payloads is ignored on deserialization.

use grasshopper_core::Cents;
use serde::{Deserialize, Serialize};

// =============================================================================
// Shared
// =============================================================================

/// An amount of money in the currency's smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    #[serde(default = "default_currency")]
    pub currency: CurrencyCode,
}

/// ISO currency code; always USD for this shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyCode {
    #[serde(rename = "USD")]
    Usd,
    #[serde(other)]
    Other,
}

const fn default_currency() -> CurrencyCode {
    CurrencyCode::Usd
}

impl Money {
    /// US dollars from cents.
    #[must_use]
    pub const fn usd(amount: Cents) -> Self {
        Self {
            amount: amount.as_i64(),
            currency: CurrencyCode::Usd,
        }
    }

    #[must_use]
    pub const fn cents(&self) -> Cents {
        Cents::new(self.amount)
    }
}

/// One entry of Square's `errors` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// The `errors` envelope present on failed responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

impl ErrorEnvelope {
    /// `errors[0].detail`, falling back to `errors[0].code`.
    #[must_use]
    pub fn first_message(&self) -> Option<String> {
        let first = self.errors.first()?;
        first
            .detail
            .clone()
            .or_else(|| first.code.clone())
            .filter(|m| !m.trim().is_empty())
    }
}

// =============================================================================
// Locations
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListLocationsResponse {
    #[serde(default)]
    pub locations: Vec<Location>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Catalog object type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogObjectType {
    Item,
    ItemVariation,
    Category,
    Image,
    Discount,
    PricingRule,
    ProductSet,
    #[serde(other)]
    Other,
}

impl CatalogObjectType {
    /// Wire name used in `types=` query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "ITEM",
            Self::ItemVariation => "ITEM_VARIATION",
            Self::Category => "CATEGORY",
            Self::Image => "IMAGE",
            Self::Discount => "DISCOUNT",
            Self::PricingRule => "PRICING_RULE",
            Self::ProductSet => "PRODUCT_SET",
            Self::Other => "OTHER",
        }
    }
}

/// A Square catalog object. Exactly one of the `*_data` fields is set,
/// matching [`CatalogObject::object_type`].
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogObject {
    #[serde(rename = "type")]
    pub object_type: CatalogObjectType,
    pub id: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub item_data: Option<ItemData>,
    #[serde(default)]
    pub item_variation_data: Option<ItemVariationData>,
    #[serde(default)]
    pub category_data: Option<CategoryData>,
    #[serde(default)]
    pub image_data: Option<ImageData>,
    #[serde(default)]
    pub discount_data: Option<DiscountData>,
    #[serde(default)]
    pub pricing_rule_data: Option<PricingRuleData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    #[serde(default)]
    pub image_ids: Vec<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub variations: Vec<CatalogObject>,
}

impl ItemData {
    /// The item's category id, from the legacy field or the first entry of
    /// `categories`.
    #[must_use]
    pub fn primary_category_id(&self) -> Option<&str> {
        self.category_id
            .as_deref()
            .or_else(|| self.categories.first().map(|c| c.id.as_str()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemVariationData {
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price_money: Option<Money>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscountData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub discount_type: Option<String>,
    #[serde(default)]
    pub percentage: Option<String>,
    #[serde(default)]
    pub amount_money: Option<Money>,
}

/// Pricing rule; dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingRuleData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub discount_id: Option<String>,
    #[serde(default)]
    pub valid_from_date: Option<String>,
    #[serde(default)]
    pub valid_until_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveCatalogObjectResponse {
    #[serde(default)]
    pub object: Option<CatalogObject>,
}

/// Page of `GET /catalog/list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCatalogResponse {
    #[serde(default)]
    pub objects: Vec<CatalogObject>,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Result of `POST /catalog/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCatalogResponse {
    #[serde(default)]
    pub objects: Vec<CatalogObject>,
    #[serde(default)]
    pub related_objects: Vec<CatalogObject>,
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub idempotency_key: String,
    pub order: NewOrder,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub location_id: String,
    pub line_items: Vec<OrderLineItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service_charges: Vec<OrderServiceCharge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub discounts: Vec<OrderDiscount>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fulfillments: Vec<OrderFulfillment>,
}

/// An order line. Catalog lines reference a variation; ad-hoc lines carry
/// a name and an explicit base price.
#[derive(Debug, Clone, Serialize)]
pub struct OrderLineItem {
    pub quantity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_object_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price_money: Option<Money>,
    pub item_type: &'static str,
}

impl OrderLineItem {
    /// A line that references a catalog variation at its catalog price.
    #[must_use]
    pub fn catalog(variation_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            quantity: quantity.to_string(),
            catalog_object_id: Some(variation_id.into()),
            name: None,
            base_price_money: None,
            item_type: "ITEM",
        }
    }

    /// A named line with a server-computed unit price.
    #[must_use]
    pub fn priced(name: impl Into<String>, unit_price: Cents, quantity: u32) -> Self {
        Self {
            quantity: quantity.to_string(),
            catalog_object_id: None,
            name: Some(name.into()),
            base_price_money: Some(Money::usd(unit_price)),
            item_type: "ITEM",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderServiceCharge {
    pub name: String,
    pub amount_money: Money,
    pub calculation_phase: &'static str,
}

impl OrderServiceCharge {
    #[must_use]
    pub fn subtotal_phase(name: impl Into<String>, amount: Cents) -> Self {
        Self {
            name: name.into(),
            amount_money: Money::usd(amount),
            calculation_phase: "SUBTOTAL_PHASE",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderDiscount {
    pub name: String,
    pub amount_money: Money,
    pub scope: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderFulfillment {
    #[serde(rename = "type")]
    pub fulfillment_type: &'static str,
    pub state: &'static str,
    pub shipment_details: ShipmentDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipmentDetails {
    pub recipient: Recipient,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recipient {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    pub address: Address,
}

#[derive(Debug, Clone, Serialize)]
pub struct Address {
    pub address_line_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    pub locality: String,
    pub administrative_district_level_1: String,
    pub postal_code: String,
    pub country: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub total_money: Option<Money>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderResponse {
    #[serde(default)]
    pub order: Option<Order>,
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentRequest {
    pub idempotency_key: String,
    pub source_id: String,
    pub amount_money: Money,
    pub order_id: String,
    pub location_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub id: String,
    #[serde(default = "default_payment_status")]
    pub status: grasshopper_core::PaymentStatus,
    #[serde(default)]
    pub receipt_url: Option<String>,
}

const fn default_payment_status() -> grasshopper_core::PaymentStatus {
    grasshopper_core::PaymentStatus::Unknown
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePaymentResponse {
    #[serde(default)]
    pub payment: Option<Payment>,
}

// =============================================================================
// Payment links (hosted checkout)
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentLinkRequest {
    pub idempotency_key: String,
    pub order: NewOrder,
    pub checkout_options: CheckoutOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_populated_data: Option<PrePopulatedData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutOptions {
    pub allow_tipping: bool,
    pub ask_for_shipping_address: bool,
    pub accepted_payment_methods: AcceptedPaymentMethods,
}

impl CheckoutOptions {
    /// Wallets on, tipping off; optionally collect a shipping address.
    #[must_use]
    pub const fn storefront(ask_for_shipping_address: bool) -> Self {
        Self {
            allow_tipping: false,
            ask_for_shipping_address,
            accepted_payment_methods: AcceptedPaymentMethods {
                apple_pay: true,
                google_pay: true,
                cash_app_pay: false,
                afterpay_clearpay: false,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct AcceptedPaymentMethods {
    pub apple_pay: bool,
    pub google_pay: bool,
    pub cash_app_pay: bool,
    pub afterpay_clearpay: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrePopulatedData {
    pub buyer_phone_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentLink {
    #[serde(default)]
    pub id: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePaymentLinkResponse {
    #[serde(default)]
    pub payment_link: Option<PaymentLink>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_catalog_object_deserializes_variation() {
        let obj: CatalogObject = serde_json::from_value(json!({
            "type": "ITEM_VARIATION",
            "id": "VAR1",
            "version": 1,
            "item_variation_data": {
                "item_id": "ITEM1",
                "name": "8.4 oz",
                "price_money": { "amount": 3000, "currency": "USD" }
            }
        }))
        .unwrap();
        assert_eq!(obj.object_type, CatalogObjectType::ItemVariation);
        let data = obj.item_variation_data.unwrap();
        assert_eq!(data.item_id.as_deref(), Some("ITEM1"));
        assert_eq!(data.price_money.unwrap().cents(), Cents::new(3000));
    }

    #[test]
    fn test_unknown_object_type_is_other() {
        let obj: CatalogObject =
            serde_json::from_value(json!({ "type": "TAX", "id": "T1" })).unwrap();
        assert_eq!(obj.object_type, CatalogObjectType::Other);
    }

    #[test]
    fn test_primary_category_prefers_legacy_field() {
        let data: ItemData = serde_json::from_value(json!({
            "category_id": "C1",
            "categories": [{ "id": "C2" }]
        }))
        .unwrap();
        assert_eq!(data.primary_category_id(), Some("C1"));

        let data: ItemData =
            serde_json::from_value(json!({ "categories": [{ "id": "C2" }] })).unwrap();
        assert_eq!(data.primary_category_id(), Some("C2"));
    }

    #[test]
    fn test_error_envelope_message() {
        let env: ErrorEnvelope = serde_json::from_value(json!({
            "errors": [{ "category": "PAYMENT_METHOD_ERROR", "code": "CARD_DECLINED" }]
        }))
        .unwrap();
        assert_eq!(env.first_message().as_deref(), Some("CARD_DECLINED"));
        assert!(ErrorEnvelope::default().first_message().is_none());
    }

    #[test]
    fn test_priced_line_item_serialization() {
        let line = OrderLineItem::priced("Olaplex No. 3 - 3.3 oz", Cents::new(2400), 2);
        assert_eq!(
            serde_json::to_value(&line).unwrap(),
            json!({
                "quantity": "2",
                "name": "Olaplex No. 3 - 3.3 oz",
                "base_price_money": { "amount": 2400, "currency": "USD" },
                "item_type": "ITEM"
            })
        );
    }
}
