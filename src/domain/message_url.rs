//! MessageUrl value object.

use super::errors::ValidationError;
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

/// The audio file or call-instruction document the provider fetches when a call connects.
///
/// Only `http` and `https` URLs are accepted; the content behind the URL is
/// never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageUrl(Url);

impl MessageUrl {
    /// Parse and validate a message URL.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidMessageUrl` if the value does not parse
    /// or uses a scheme other than http/https.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let url = Url::parse(trimmed)
            .map_err(|_| ValidationError::InvalidMessageUrl(raw.to_string()))?;

        match url.scheme() {
            "http" | "https" if url.host_str().is_some() => Ok(Self(url)),
            _ => Err(ValidationError::InvalidMessageUrl(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Serialize for MessageUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for MessageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(MessageUrl::parse("https://example.com/twiml.xml").is_ok());
        assert!(MessageUrl::parse("http://example.com/a.mp3").is_ok());
        assert!(MessageUrl::parse("  https://example.com/a.mp3 ").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(
            MessageUrl::parse("ftp://example.com/a.mp3"),
            Err(ValidationError::InvalidMessageUrl(
                "ftp://example.com/a.mp3".to_string()
            ))
        );
        assert!(MessageUrl::parse("file:///tmp/a.mp3").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(MessageUrl::parse("").is_err());
        assert!(MessageUrl::parse("not a url").is_err());
        assert!(MessageUrl::parse("example.com/a.mp3").is_err());
    }
}
