//! US phone numbers for pickup orders.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// Fewer than ten digits were supplied.
    #[error("phone number must contain at least 10 digits")]
    TooShort,
    /// More digits than any valid E.164 number.
    #[error("phone number must contain at most 15 digits")]
    TooLong,
}

/// A phone number as typed by the customer, with its digits extracted.
///
/// Pickup orders require a reachable number; the commerce platform wants
/// it in E.164 form, which [`PhoneNumber::to_e164`] produces for US numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    display: String,
    digits: String,
}

impl PhoneNumber {
    /// Parse a phone number from free text such as `(704) 555-0100`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::TooShort`] when fewer than ten digits remain
    /// after stripping formatting, or [`PhoneError::TooLong`] for more than 15.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 10 {
            return Err(PhoneError::TooShort);
        }
        if digits.len() > 15 {
            return Err(PhoneError::TooLong);
        }
        Ok(Self {
            display: raw.trim().to_owned(),
            digits,
        })
    }

    /// E.164 form, assuming a US number when no country code is present.
    ///
    /// `7045550100` becomes `+17045550100`; `17045550100` becomes `+17045550100`.
    #[must_use]
    pub fn to_e164(&self) -> String {
        if self.digits.starts_with('1') {
            format!("+{}", self.digits)
        } else {
            format!("+1{}", self.digits)
        }
    }

    /// The number as the customer typed it.
    #[must_use]
    pub fn as_display(&self) -> &str {
        &self.display
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_e164_formatting() {
        let phone = PhoneNumber::parse("(704) 555-0100").unwrap();
        assert_eq!(phone.to_e164(), "+17045550100");
        assert_eq!(phone.as_display(), "(704) 555-0100");

        let with_country = PhoneNumber::parse("1-704-555-0100").unwrap();
        assert_eq!(with_country.to_e164(), "+17045550100");
    }

    #[test]
    fn test_rejects_short_numbers() {
        assert_eq!(PhoneNumber::parse("555-0100"), Err(PhoneError::TooShort));
        assert_eq!(PhoneNumber::parse(""), Err(PhoneError::TooShort));
    }

    #[test]
    fn test_rejects_long_numbers() {
        assert_eq!(
            PhoneNumber::parse("1234567890123456"),
            Err(PhoneError::TooLong)
        );
    }
}
