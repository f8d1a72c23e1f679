//! Sale pricing and sales tax.
//!
//! Every product in the shop is sold at a store-wide discount off the
//! catalog price, rounded to whole dollars. Sales tax is North Carolina's
//! combined rate and applies to merchandise only, after any promo discount.

use rust_decimal::Decimal;

use crate::types::Cents;
use crate::types::money::round_to_i64;

/// Store-wide sale discount (20%).
pub const SALE_DISCOUNT: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// North Carolina sales tax rate (7.25%).
pub const TAX_RATE: Decimal = Decimal::from_parts(725, 0, 0, false, 4);

/// Label used for the tax service charge on orders.
pub const TAX_LABEL: &str = "NC Sales Tax (7.25%)";

/// Largest quantity accepted for a single line item.
pub const MAX_QUANTITY: u32 = 100;

/// Sale price for a catalog base price: `round(base_dollars * 0.8)` whole
/// dollars, expressed in cents. Negative prices are treated as zero.
///
/// ```
/// use grasshopper_core::{Cents, pricing::sale_price};
///
/// assert_eq!(sale_price(Cents::new(2999)), Cents::new(2400));
/// assert_eq!(sale_price(Cents::new(3400)), Cents::new(2700));
/// ```
#[must_use]
pub fn sale_price(base: Cents) -> Cents {
    let dollars = base.non_negative().to_dollars();
    let sale_dollars = round_to_i64(dollars * (Decimal::ONE - SALE_DISCOUNT));
    Cents::new(sale_dollars.saturating_mul(100))
}

/// Sales tax on a taxable amount, rounded to the nearest cent, never negative.
#[must_use]
pub fn sales_tax(taxable: Cents) -> Cents {
    let taxable = Decimal::from(taxable.non_negative().as_i64());
    Cents::new(round_to_i64(taxable * TAX_RATE))
}

/// Validate a line-item quantity from a JSON payload.
///
/// Accepts whole numbers in `1..=100`; anything else (fractions, zero,
/// negatives, non-numbers) yields `None`.
#[must_use]
pub fn normalize_quantity(raw: &serde_json::Value) -> Option<u32> {
    let n = raw.as_u64()?;
    u32::try_from(n)
        .ok()
        .filter(|q| (1..=MAX_QUANTITY).contains(q))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_sale_price_rounds_to_whole_dollars() {
        // 29.99 * 0.8 = 23.992 -> $24
        assert_eq!(sale_price(Cents::new(2999)), Cents::new(2400));
        // 31.25 * 0.8 = 25.00
        assert_eq!(sale_price(Cents::new(3125)), Cents::new(2500));
        // 3.13 * 0.8 = 2.504 -> $3
        assert_eq!(sale_price(Cents::new(313)), Cents::new(300));
        // 1.88 * 0.8 = 1.504 -> $2
        assert_eq!(sale_price(Cents::new(188)), Cents::new(200));
        assert_eq!(sale_price(Cents::ZERO), Cents::ZERO);
        assert_eq!(sale_price(Cents::new(-500)), Cents::ZERO);
    }

    #[test]
    fn test_sale_price_is_deterministic() {
        for base in [0, 1, 99, 1999, 2999, 4550, 12_345] {
            let base = Cents::new(base);
            assert_eq!(sale_price(base), sale_price(base));
            assert_eq!(sale_price(base).as_i64() % 100, 0);
        }
    }

    #[test]
    fn test_sales_tax() {
        assert_eq!(sales_tax(Cents::new(10_000)), Cents::new(725));
        // 2400 * 0.0725 = 174.0
        assert_eq!(sales_tax(Cents::new(2400)), Cents::new(174));
        // 1000 * 0.0725 = 72.5 -> 73
        assert_eq!(sales_tax(Cents::new(1000)), Cents::new(73));
        assert_eq!(sales_tax(Cents::ZERO), Cents::ZERO);
        assert_eq!(sales_tax(Cents::new(-100)), Cents::ZERO);
    }

    #[test]
    fn test_normalize_quantity() {
        assert_eq!(normalize_quantity(&json!(1)), Some(1));
        assert_eq!(normalize_quantity(&json!(100)), Some(100));
        assert_eq!(normalize_quantity(&json!(0)), None);
        assert_eq!(normalize_quantity(&json!(101)), None);
        assert_eq!(normalize_quantity(&json!(-2)), None);
        assert_eq!(normalize_quantity(&json!(1.5)), None);
        assert_eq!(normalize_quantity(&json!("3")), None);
    }
}
