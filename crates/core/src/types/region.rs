//! US state codes for shipping destinations.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A two-letter US state (or territory) postal code.
///
/// Checkout forms send whatever the customer typed into the state field.
/// Parsing keeps the first two characters and upper-cases them, so
/// `"nc"` and `"NC "` both become `NC`. Codes that are not in the shipping
/// zone table are still accepted; they simply fall back to the default zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct UsState(String);

impl UsState {
    /// Destination used when a shipping order carries no state.
    pub const DEFAULT_CODE: &'static str = "NY";

    /// Parse a state code from free text, returning `None` when blank.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let code: String = raw.trim().chars().take(2).collect::<String>().to_uppercase();
        if code.is_empty() { None } else { Some(Self(code)) }
    }

    /// Parse a state code, falling back to [`UsState::DEFAULT_CODE`].
    #[must_use]
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    /// The upper-cased code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UsState {
    fn default() -> Self {
        Self(Self::DEFAULT_CODE.to_owned())
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UsState {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

impl From<UsState> for String {
    fn from(state: UsState) -> Self {
        state.0
    }
}
