//! Shipping charges.
//!
//! Two models coexist:
//!
//! - **Flat rate**: a per-unit charge looked up by product and variation
//!   name. Hosted checkout links and the cart preview use it.
//! - **UPS Ground by zone**: a base charge plus a per-pound surcharge for
//!   the destination's zone from Charlotte, NC. Direct card payments use it,
//!   with each product's weight estimated from its flat rate.

mod rates;

use std::collections::HashMap;
use std::sync::LazyLock;

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::money::round_to_i64;
use crate::types::{Cents, UsState};

/// Per-unit charge for products missing from the flat-rate table.
pub const DEFAULT_FLAT_RATE: Cents = Cents::new(750);

/// Variation name used when a product has a single variation.
pub const STANDARD_VARIATION: &str = "Standard";

static FLAT_RATE_INDEX: LazyLock<HashMap<&'static str, &'static [(&'static str, i64)]>> =
    LazyLock::new(|| rates::FLAT_RATES.iter().copied().collect());

/// Look up a product variation's per-unit flat shipping rate.
///
/// Returns `None` when the product or the variation is not in the table.
#[must_use]
pub fn lookup_flat_rate(product: &str, variation: &str) -> Option<Cents> {
    FLAT_RATE_INDEX
        .get(product)?
        .iter()
        .find(|(name, _)| *name == variation)
        .map(|&(_, cents)| Cents::new(cents))
}

/// Per-unit flat shipping rate, falling back to [`DEFAULT_FLAT_RATE`].
#[must_use]
pub fn flat_rate(product: &str, variation: &str) -> Cents {
    lookup_flat_rate(product, variation).unwrap_or(DEFAULT_FLAT_RATE)
}

/// Number of products in the flat-rate table.
#[must_use]
pub fn flat_rate_product_count() -> usize {
    rates::FLAT_RATES.len()
}

/// A shipping weight in pounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(Decimal);

impl Weight {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[must_use]
    pub const fn from_lbs(lbs: Decimal) -> Self {
        Self(lbs)
    }

    #[must_use]
    pub const fn lbs(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lb", self.0.normalize())
    }
}

impl Add for Weight {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Weight {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Weight brackets keyed by the inclusive upper bound of the flat rate.
const WEIGHT_BRACKETS: &[(i64, Decimal)] = &[
    (550, Decimal::from_parts(5, 0, 0, false, 1)),
    (650, Decimal::from_parts(75, 0, 0, false, 2)),
    (750, Decimal::ONE),
    (850, Decimal::from_parts(15, 0, 0, false, 1)),
    (900, Decimal::from_parts(2, 0, 0, false, 0)),
    (950, Decimal::from_parts(25, 0, 0, false, 1)),
    (1100, Decimal::from_parts(3, 0, 0, false, 0)),
    (1450, Decimal::from_parts(4, 0, 0, false, 0)),
];

const HEAVIEST_BRACKET: Decimal = Decimal::from_parts(6, 0, 0, false, 0);

/// Estimate a product's weight from its per-unit flat shipping rate.
#[must_use]
pub fn estimate_weight(flat_rate: Cents) -> Weight {
    let lbs = WEIGHT_BRACKETS
        .iter()
        .find(|(max, _)| flat_rate.as_i64() <= *max)
        .map_or(HEAVIEST_BRACKET, |&(_, lbs)| lbs);
    Weight(lbs)
}

/// Estimated weight of one unit of a product variation.
#[must_use]
pub fn product_weight(product: &str, variation: &str) -> Weight {
    estimate_weight(flat_rate(product, variation))
}

/// UPS Ground zone from the shop in Charlotte, NC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Zone(u8);

impl Zone {
    /// Zone used for unknown destinations.
    pub const DEFAULT: Self = Self(5);

    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Base charge and per-pound surcharge for this zone.
    #[must_use]
    pub fn rate(self) -> UpsRate {
        UPS_RATES
            .iter()
            .find(|(zone, _)| *zone == self.0)
            .map_or(DEFAULT_RATE, |&(_, rate)| rate)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone {}", self.0)
    }
}

/// UPS Ground pricing for one zone, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsRate {
    pub base: Cents,
    pub per_lb: Cents,
}

const fn ups_rate(base: i64, per_lb: i64) -> UpsRate {
    UpsRate {
        base: Cents::new(base),
        per_lb: Cents::new(per_lb),
    }
}

const DEFAULT_RATE: UpsRate = ups_rate(1150, 85);

/// UPS Ground rates by zone.
pub const UPS_RATES: &[(u8, UpsRate)] = &[
    (2, ups_rate(850, 40)),
    (3, ups_rate(950, 55)),
    (4, ups_rate(1050, 70)),
    (5, DEFAULT_RATE),
    (6, ups_rate(1250, 100)),
    (7, ups_rate(1400, 115)),
    (8, ups_rate(1550, 130)),
];

const STATE_ZONES: &[(u8, &[&str])] = &[
    (2, &["NC", "SC"]),
    (3, &["VA", "GA", "TN", "WV", "DC"]),
    (4, &["FL", "AL", "MS", "KY", "OH", "PA", "MD", "DE", "NJ", "IN"]),
    (5, &["NY", "CT", "MA", "NH", "VT", "ME", "RI", "MI", "WI", "MN", "IL", "IA"]),
    (6, &["TX", "LA", "AR", "MO", "NE", "KS", "OK", "ND", "SD"]),
    (7, &["CO", "WY", "MT", "NM", "AZ", "UT", "ID"]),
    (8, &["CA", "OR", "WA", "NV", "HI", "AK"]),
];

/// Zone for a destination state; states not in the table use [`Zone::DEFAULT`].
#[must_use]
pub fn zone_for_state(state: &UsState) -> Zone {
    STATE_ZONES
        .iter()
        .find(|(_, states)| states.contains(&state.as_str()))
        .map_or(Zone::DEFAULT, |&(zone, _)| Zone(zone))
}

/// UPS Ground charge for a shipment: `base + per_lb * weight`, rounded to the cent.
#[must_use]
pub fn ups_ground_cost(weight: Weight, state: &UsState) -> Cents {
    let rate = zone_for_state(state).rate();
    let per_lb = Decimal::from(rate.per_lb.as_i64()) * weight.lbs();
    Cents::new(rate.base.as_i64().saturating_add(round_to_i64(per_lb)))
}
