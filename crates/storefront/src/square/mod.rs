//! Square commerce API client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`, one shared client with default auth headers
//! - Square is the source of truth for catalog, orders and payments
//! - In-memory caching via `moka` (location id 10 minutes, catalog objects
//!   and catalog lists 5 minutes); only successful lookups are cached
//!
//! # Example
//!
//! ```rust,ignore
//! use grasshopper_storefront::square::SquareClient;
//!
//! let client = SquareClient::new(&config.square, config.http_timeout)?;
//! let location = client.location_id().await?;
//! let variation = client.catalog_object("W62UWFY35CWMYGVWK6TWJDNI").await?;
//! ```

mod client;
pub mod types;

pub use client::SquareClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to Square.
#[derive(Debug, Error)]
pub enum SquareError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Square answered with a non-success status.
    #[error("Square API error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api {
        status: u16,
        /// `errors[0].detail` (or `code`) from the response body.
        detail: Option<String>,
    },

    /// A success response could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A success response lacked the object it should carry.
    #[error("Square response is missing `{0}`")]
    MissingField(&'static str),

    /// The account has no locations.
    #[error("No Square location found")]
    NoLocation,

    /// Invalid credentials for the auth header.
    #[error("Invalid Square access token: {0}")]
    InvalidToken(String),
}

impl SquareError {
    /// Square's own error message, when it sent one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Whether Square reported the object as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_only_for_api_errors() {
        let err = SquareError::Api {
            status: 400,
            detail: Some("Card declined.".to_string()),
        };
        assert_eq!(err.detail(), Some("Card declined."));
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Square API error (400): Card declined.");

        assert_eq!(SquareError::NoLocation.detail(), None);
        assert!(
            SquareError::Api {
                status: 404,
                detail: None
            }
            .is_not_found()
        );
    }
}
