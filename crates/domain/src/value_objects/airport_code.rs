//! Airport code value object
//!
//! An airport identifier as supplied by the caller (e.g. `KJFK`). The code is
//! passed verbatim into the outbound history request path, so it must be
//! non-empty and free of characters that would change the path structure.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::AirportCode;
//!
//! let code = AirportCode::new("KJFK").expect("valid code");
//! assert_eq!(code.as_str(), "KJFK");
//!
//! assert!(AirportCode::new("").is_err());
//! assert!(AirportCode::new("KJ/FK").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Characters that are not allowed inside an airport code
const FORBIDDEN_CHARS: [char; 4] = ['/', '?', '#', '%'];

/// Validated airport code
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AirportCode(String);

impl AirportCode {
    /// Create a new validated airport code
    ///
    /// The code is stored as given; case is preserved.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAirportCode` if the code is empty or
    /// contains whitespace or any of `/ ? # %`.
    pub fn new(code: impl Into<String>) -> Result<Self, DomainError> {
        let code = code.into();
        let invalid = code.is_empty()
            || code
                .chars()
                .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_CHARS.contains(&c));

        if invalid {
            return Err(DomainError::InvalidAirportCode(code));
        }
        Ok(Self(code))
    }

    /// Get the code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AirportCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for AirportCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AirportCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Custom deserialization that validates airport codes
impl<'de> Deserialize<'de> for AirportCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
