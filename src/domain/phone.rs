//! PhoneNumber value object and the normalization policy applied to raw CSV entries.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A destination or caller-ID number.
///
/// Only emptiness is checked at construction time. Whether the provider can
/// actually dial the number is the provider's concern, so malformed entries are
/// kept and reported per call instead of being dropped here.
///
/// # Example
///
/// ```
/// use voice_broadcast_server::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+15551234567").unwrap();
/// assert_eq!(phone.as_str(), "+15551234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyPhone` if the value is empty or only whitespace.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();

        if phone.trim().is_empty() {
            return Err(ValidationError::EmptyPhone);
        }

        Ok(Self(phone))
    }

    /// Whether the number only uses characters found in dialable numbers.
    ///
    /// Digits, spaces, hyphens, parentheses, plus sign and periods are accepted,
    /// and at least one digit is required.
    pub fn looks_dialable(&self) -> bool {
        self.0.chars().any(|c| c.is_ascii_digit())
            && self.0.chars().all(|c| {
                c.is_ascii_digit()
                    || c == ' '
                    || c == '-'
                    || c == '('
                    || c == ')'
                    || c == '+'
                    || c == '.'
            })
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How raw contact entries are turned into dialable numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationPolicy {
    /// Pass the raw entry through unchanged.
    Disabled,

    /// Trim the entry and prefix `+<country_code>` unless it already starts with `+`.
    Prefix { country_code: String },
}

impl NormalizationPolicy {
    /// Prefix policy for the given country calling code (digits only, 1-3 long).
    pub fn prefix(country_code: impl Into<String>) -> Result<Self, ValidationError> {
        let country_code = country_code.into();
        let valid = !country_code.is_empty()
            && country_code.len() <= 3
            && country_code.chars().all(|c| c.is_ascii_digit());

        if !valid {
            return Err(ValidationError::InvalidCountryCode(country_code));
        }

        Ok(Self::Prefix { country_code })
    }

    /// Apply the policy to one raw entry.
    pub fn apply(&self, raw: &str) -> Result<PhoneNumber, ValidationError> {
        match self {
            Self::Disabled => PhoneNumber::new(raw),
            Self::Prefix { country_code } => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::EmptyPhone);
                }
                if trimmed.starts_with('+') {
                    PhoneNumber::new(trimmed)
                } else {
                    PhoneNumber::new(format!("+{}{}", country_code, trimmed))
                }
            }
        }
    }
}

impl Default for NormalizationPolicy {
    /// North American numbering: `+1`.
    fn default() -> Self {
        Self::Prefix {
            country_code: "1".to_string(),
        }
    }
}
