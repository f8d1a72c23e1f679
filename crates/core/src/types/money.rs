//! Integer money amounts in US cents.
//!
//! Square expresses every amount as an integer number of the currency's
//! smallest unit, so all storefront arithmetic happens on [`Cents`] and only
//! converts to dollars for display and for the catalog JSON the browser
//! consumes.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Sub};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 code of the only currency the shop sells in.
pub const CURRENCY: &str = "USD";

/// An amount of money in US cents.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a number of cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// The raw number of cents.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Clamp negative amounts to zero.
    #[must_use]
    pub const fn non_negative(self) -> Self {
        if self.0 < 0 { Self::ZERO } else { self }
    }

    /// Whether the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// The amount as a decimal number of dollars (`1234` -> `12.34`).
    #[must_use]
    pub fn to_dollars(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// The amount in dollars as a float, for JSON consumed by the browser.
    #[must_use]
    pub fn to_dollars_f64(self) -> f64 {
        self.to_dollars().to_f64().unwrap_or_default()
    }

    /// Convert a dollar amount to cents, rounding half away from zero.
    #[must_use]
    pub fn from_dollars(dollars: Decimal) -> Self {
        Self(round_to_i64(dollars * Decimal::ONE_HUNDRED))
    }

    /// Saturating subtraction that never goes below zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0)).non_negative()
    }
}

/// Round a decimal to the nearest integer, halves away from zero.
///
/// For the non-negative amounts the storefront deals in this matches the
/// browser's `Math.round`, which the cart preview uses.
#[must_use]
pub fn round_to_i64(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

impl fmt::Display for Cents {
    /// Formats as dollars, e.g. `$12.34` or `-$3.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Cents {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<u32> for Cents {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(rhs)))
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<i64> for Cents {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}
