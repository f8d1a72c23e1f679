//! Promo code discounts.
//!
//! A promo code resolves (in the storefront) to a Square `DISCOUNT` catalog
//! object. This module turns that object into a [`Discount`] and computes
//! how much it takes off an order.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};

use crate::types::Cents;
use crate::types::money::round_to_i64;

/// Promo code that always grants free shipping, whatever the discount says.
pub const FREE_SHIPPING_CODE: &str = "FREESHIP";

/// What a resolved promo code takes off the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// The shipping charge is waived.
    FreeShipping,
    /// A percentage (e.g. `15` for 15%) of subtotal plus shipping.
    Percent(Decimal),
    /// A fixed amount off, capped at subtotal plus shipping.
    Fixed(Cents),
    /// A discount type the storefront does not know how to apply.
    Unrecognised,
}

impl Discount {
    /// Classify a catalog discount.
    ///
    /// `name` is the discount's display name, `code` the normalized code the
    /// customer entered, `discount_type` Square's `discount_type`,
    /// `percentage` its decimal string and `amount` its `amount_money` in cents.
    #[must_use]
    pub fn from_catalog(
        name: Option<&str>,
        code: &str,
        discount_type: Option<&str>,
        percentage: Option<&str>,
        amount: Option<i64>,
    ) -> Self {
        let lower_name = name.unwrap_or_default().to_lowercase();
        if lower_name.contains("free shipping") || code == FREE_SHIPPING_CODE {
            return Self::FreeShipping;
        }
        match discount_type {
            Some("FIXED_PERCENTAGE" | "VARIABLE_PERCENTAGE") => {
                let pct = percentage
                    .and_then(|p| p.trim().parse::<Decimal>().ok())
                    .unwrap_or_default();
                Self::Percent(pct)
            }
            Some("FIXED_AMOUNT" | "VARIABLE_AMOUNT") => {
                Self::Fixed(Cents::new(amount.unwrap_or_default()))
            }
            _ => Self::Unrecognised,
        }
    }

    /// The customer-facing summary returned when a code is validated.
    #[must_use]
    pub fn summary(&self, code: &str) -> PromoSummary {
        let (kind, value, message) = match *self {
            Self::FreeShipping => (
                DiscountKind::Fixed,
                Decimal::ZERO,
                "Free shipping applied!".to_owned(),
            ),
            Self::Percent(pct) => (
                DiscountKind::Percent,
                pct.normalize(),
                format!("{}% off your order!", pct.normalize()),
            ),
            Self::Fixed(amount) => (
                DiscountKind::Fixed,
                Decimal::from(amount.as_i64()),
                format!("{amount} off your order!"),
            ),
            Self::Unrecognised => (
                DiscountKind::Percent,
                Decimal::ZERO,
                "Discount applied!".to_owned(),
            ),
        };
        PromoSummary {
            valid: true,
            code: code.to_owned(),
            kind,
            value,
            free_shipping: matches!(self, Self::FreeShipping),
            message,
        }
    }
}

/// `type` field of a validated promo: `percent` or `fixed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percent,
    Fixed,
}

/// Response body for a valid promo code.
///
/// `value` is the percentage for percent discounts and the amount in cents
/// for fixed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoSummary {
    pub valid: bool,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    #[serde(serialize_with = "serialize_json_number")]
    pub value: Decimal,
    pub free_shipping: bool,
    pub message: String,
}

/// Serialize whole decimals as JSON integers and others as floats.
fn serialize_json_number<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let value = value.normalize();
    if value.scale() == 0
        && let Some(int) = value.to_i64()
    {
        return serializer.serialize_i64(int);
    }
    serializer.serialize_f64(value.to_f64().unwrap_or_default())
}

/// The effect of a discount on one order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountBreakdown {
    /// Total amount taken off the order.
    pub discount: Cents,
    /// Part of [`Self::discount`] that reduces merchandise, and therefore
    /// the taxable amount.
    pub product_discount: Cents,
    pub free_shipping: bool,
}

/// Apply a discount to an order's subtotal and shipping charge.
///
/// The result never exceeds `subtotal + shipping` and is never negative.
#[must_use]
pub fn compute_discount(discount: &Discount, subtotal: Cents, shipping: Cents) -> DiscountBreakdown {
    let subtotal = subtotal.non_negative();
    let shipping = shipping.non_negative();
    let ceiling = subtotal + shipping;

    let raw = match *discount {
        Discount::FreeShipping => {
            return DiscountBreakdown {
                discount: shipping,
                product_discount: Cents::ZERO,
                free_shipping: true,
            };
        }
        Discount::Percent(pct) => {
            let base = Decimal::from(ceiling.as_i64());
            Cents::new(round_to_i64(base * pct / Decimal::ONE_HUNDRED))
        }
        Discount::Fixed(amount) => amount,
        Discount::Unrecognised => Cents::ZERO,
    };

    let amount = raw.non_negative().min(ceiling);
    DiscountBreakdown {
        discount: amount,
        product_discount: amount.min(subtotal),
        free_shipping: false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_catalog_classifies() {
        assert_eq!(
            Discount::from_catalog(Some("Free Shipping Weekend"), "SHIPIT", None, None, None),
            Discount::FreeShipping
        );
        assert_eq!(
            Discount::from_catalog(
                Some("FREESHIP"),
                FREE_SHIPPING_CODE,
                Some("FIXED_PERCENTAGE"),
                Some("10"),
                None
            ),
            Discount::FreeShipping
        );
        assert_eq!(
            Discount::from_catalog(Some("SAVE15"), "SAVE15", Some("FIXED_PERCENTAGE"), Some("15.0"), None),
            Discount::Percent(Decimal::new(150, 1))
        );
        assert_eq!(
            Discount::from_catalog(Some("TAKE5"), "TAKE5", Some("FIXED_AMOUNT"), None, Some(500)),
            Discount::Fixed(Cents::new(500))
        );
        assert_eq!(
            Discount::from_catalog(Some("ODD"), "ODD", Some("VARIABLE_PERCENTAGE"), Some("abc"), None),
            Discount::Percent(Decimal::ZERO)
        );
        assert_eq!(
            Discount::from_catalog(Some("BOGO"), "BOGO", None, None, None),
            Discount::Unrecognised
        );
    }

    #[test]
    fn test_summary_messages() {
        let pct = Discount::Percent(Decimal::new(150, 1)).summary("SAVE15");
        assert_eq!(pct.message, "15% off your order!");
        assert_eq!(
            serde_json::to_value(&pct).unwrap(),
            json!({
                "valid": true,
                "code": "SAVE15",
                "type": "percent",
                "value": 15,
                "freeShipping": false,
                "message": "15% off your order!"
            })
        );

        let half = Discount::Percent(Decimal::new(125, 1)).summary("HALF");
        assert_eq!(half.message, "12.5% off your order!");
        assert_eq!(serde_json::to_value(&half).unwrap()["value"], json!(12.5));

        let fixed = Discount::Fixed(Cents::new(500)).summary("TAKE5");
        assert_eq!(fixed.message, "$5.00 off your order!");
        assert_eq!(fixed.kind, DiscountKind::Fixed);
        assert_eq!(serde_json::to_value(&fixed).unwrap()["value"], json!(500));

        let ship = Discount::FreeShipping.summary("FREESHIP");
        assert!(ship.free_shipping);
        assert_eq!(ship.message, "Free shipping applied!");
        assert_eq!(ship.kind, DiscountKind::Fixed);

        let other = Discount::Unrecognised.summary("BOGO");
        assert_eq!(other.message, "Discount applied!");
        assert_eq!(other.kind, DiscountKind::Percent);
    }

    #[test]
    fn test_compute_free_shipping() {
        let b = compute_discount(&Discount::FreeShipping, Cents::new(4800), Cents::new(1225));
        assert_eq!(b.discount, Cents::new(1225));
        assert_eq!(b.product_discount, Cents::ZERO);
        assert!(b.free_shipping);
    }

    #[test]
    fn test_compute_percent_applies_to_subtotal_and_shipping() {
        // 10% of (4800 + 1200) = 600
        let b = compute_discount(
            &Discount::Percent(Decimal::TEN),
            Cents::new(4800),
            Cents::new(1200),
        );
        assert_eq!(b.discount, Cents::new(600));
        assert_eq!(b.product_discount, Cents::new(600));
        assert!(!b.free_shipping);
    }

    #[test]
    fn test_compute_fixed_is_capped() {
        let b = compute_discount(
            &Discount::Fixed(Cents::new(10_000)),
            Cents::new(2400),
            Cents::new(910),
        );
        assert_eq!(b.discount, Cents::new(3310));
        assert_eq!(b.product_discount, Cents::new(2400));
    }

    #[test]
    fn test_discount_never_exceeds_order() {
        let discounts = [
            Discount::FreeShipping,
            Discount::Percent(Decimal::new(150, 0)),
            Discount::Percent(Decimal::new(-20, 0)),
            Discount::Fixed(Cents::new(99_999)),
            Discount::Fixed(Cents::new(-50)),
            Discount::Unrecognised,
        ];
        for discount in &discounts {
            for (sub, ship) in [(0, 0), (2400, 0), (0, 1150), (4800, 1225)] {
                let b = compute_discount(discount, Cents::new(sub), Cents::new(ship));
                assert!(b.discount >= Cents::ZERO);
                assert!(b.discount <= Cents::new(sub + ship), "{discount:?} {sub} {ship}");
                assert!(b.product_discount <= Cents::new(sub));
            }
        }
    }
}
