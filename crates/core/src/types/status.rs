//! Order and payment status enums.

use serde::{Deserialize, Serialize};

/// How the customer receives the order.
///
/// The checkout form sends `"pickup"` for local pickup; every other value,
/// including a missing one, is treated as a shipping order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum OrderType {
    #[default]
    Shipping,
    Pickup,
}

impl OrderType {
    /// Human-readable label used in owner notifications.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shipping => "Shipping",
            Self::Pickup => "Pickup",
        }
    }

    #[must_use]
    pub const fn is_pickup(self) -> bool {
        matches!(self, Self::Pickup)
    }
}

impl From<String> for OrderType {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("pickup") {
            Self::Pickup
        } else {
            Self::Shipping
        }
    }
}

/// Payment status as reported by Square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Approved,
    Pending,
    Completed,
    Canceled,
    Failed,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// Whether the payment was declined or otherwise did not go through.
    #[must_use]
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed | Self::Canceled)
    }
}
