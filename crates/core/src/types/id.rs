//! Newtype IDs for commerce platform object references.
//!
//! Square identifies every catalog object, location, order and payment with
//! an opaque string. Use the `define_id!` macro to create wrappers that keep
//! those strings from being mixed up and that validate ids arriving from
//! client payloads before they are interpolated into API paths.

/// Maximum length accepted for an id supplied by a client.
pub const MAX_ID_LENGTH: usize = 64;

/// Errors that can occur when parsing an id from client input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The id is empty after trimming.
    #[error("id cannot be empty")]
    Empty,
    /// The id is longer than [`MAX_ID_LENGTH`].
    #[error("id must be at most {MAX_ID_LENGTH} characters")]
    TooLong,
    /// The id contains characters outside `[A-Za-z0-9_-]`.
    #[error("id contains invalid characters")]
    InvalidCharacters,
}

/// Validate and normalize a raw id string.
///
/// # Errors
///
/// Returns an [`IdError`] when the trimmed value is empty, too long, or
/// contains characters other than ASCII alphanumerics, `-` and `_`.
pub fn validate_id(raw: &str) -> Result<String, IdError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty);
    }
    if trimmed.len() > MAX_ID_LENGTH {
        return Err(IdError::TooLong);
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(IdError::InvalidCharacters);
    }
    Ok(trimmed.to_owned())
}

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `parse()` (validated, for client input), `new_unchecked()` (for ids
///   returned by the platform), `as_str()`
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use grasshopper_core::define_id;
/// define_id!(ItemId);
/// define_id!(ImageId);
///
/// let item = ItemId::parse("GKY5DFXV4ZL5LTOQNG2XTZMA").unwrap();
/// assert_eq!(item.as_str(), "GKY5DFXV4ZL5LTOQNG2XTZMA");
///
/// // These are different types, so this won't compile:
/// // let _: ImageId = item;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse an id from untrusted input.
            ///
            /// # Errors
            ///
            /// Returns an error if the id is empty, too long, or contains
            /// characters outside `[A-Za-z0-9_-]`.
            pub fn parse(raw: &str) -> ::core::result::Result<Self, $crate::types::id::IdError> {
                $crate::types::id::validate_id(raw).map(Self)
            }

            /// Wrap an id that came back from the commerce platform.
            #[must_use]
            pub fn new_unchecked(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <String as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <String as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

// Square object ids
define_id!(CatalogObjectId);
define_id!(LocationId);
define_id!(OrderId);
define_id!(PaymentId);

impl OrderId {
    /// Short, customer-facing order reference (last 8 characters, upper-cased).
    #[must_use]
    pub fn short_ref(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let start = chars.len().saturating_sub(8);
        chars
            .get(start..)
            .unwrap_or_default()
            .iter()
            .collect::<String>()
            .to_uppercase()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_accepts_square_ids() {
        let id = CatalogObjectId::parse("  W62UWFY35CWMYGVWK6TWJDNI ").unwrap();
        assert_eq!(id.as_str(), "W62UWFY35CWMYGVWK6TWJDNI");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(CatalogObjectId::parse(""), Err(IdError::Empty));
        assert_eq!(CatalogObjectId::parse("   "), Err(IdError::Empty));
        assert_eq!(
            CatalogObjectId::parse(&"A".repeat(65)),
            Err(IdError::TooLong)
        );
        assert_eq!(
            CatalogObjectId::parse("../locations"),
            Err(IdError::InvalidCharacters)
        );
        assert_eq!(
            CatalogObjectId::parse("abc def"),
            Err(IdError::InvalidCharacters)
        );
    }

    #[test]
    fn test_short_ref() {
        let order = OrderId::new_unchecked("lgwOlfbQuvkZHnmNAnXQlHrrcbpZY");
        assert_eq!(order.short_ref(), "HRRCBPZY");

        let tiny = OrderId::new_unchecked("abc");
        assert_eq!(tiny.short_ref(), "ABC");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = PaymentId::new_unchecked("pay_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"pay_1\"");
    }
}
