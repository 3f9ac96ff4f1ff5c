//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided phone number is empty or whitespace.
    EmptyPhone,

    /// The provided message URL is not an http(s) URL.
    InvalidMessageUrl(String),

    /// The provided country calling code is not 1-3 digits.
    InvalidCountryCode(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPhone => write!(f, "Phone number cannot be empty"),
            Self::InvalidMessageUrl(url) => write!(f, "Invalid message URL: {}", url),
            Self::InvalidCountryCode(code) => write!(f, "Invalid country code: {}", code),
        }
    }
}

impl std::error::Error for ValidationError {}
