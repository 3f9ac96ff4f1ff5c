//! Error types for the voice broadcast server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when interacting with the voice provider API.
#[derive(Error, Debug)]
pub enum VoiceApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Provider returned an error status code
    #[error("Provider error (status {status}): {message}")]
    ProviderError {
        status: u16,
        code: Option<u32>,
        message: String,
    },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur while reading a contact list.
#[derive(Error, Debug)]
pub enum ContactLoadError {
    /// The underlying stream could not be read
    #[error("Failed to read contact list: {0}")]
    Io(#[from] std::io::Error),

    /// The stream is not valid CSV (or not valid UTF-8)
    #[error("Malformed contact list at line {line}: {message}")]
    Malformed { line: u64, message: String },
}

/// Errors that reject a broadcast before any call is placed.
///
/// Display strings are the plain-text bodies returned to the uploader.
#[derive(Error, Debug)]
pub enum BroadcastError {
    #[error("No file part")]
    MissingFile,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("No \"From\" phone number specified")]
    MissingFromNumber,

    #[error("Invalid \"From\" phone number: {0}")]
    InvalidFromNumber(String),

    #[error("Invalid file type. Please upload a CSV file.")]
    InvalidFileType,

    #[error("No message URL specified")]
    MissingMessageUrl,

    #[error("Invalid audio URL: {0}")]
    InvalidMessageUrl(String),

    #[error("Upload too large (max {max} bytes)")]
    PayloadTooLarge { max: usize },

    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    #[error("Failed to load contacts: {0}")]
    LoadFailed(#[from] ContactLoadError),
}

/// Convenience type alias for Results with VoiceApiError
pub type VoiceApiResult<T> = Result<T, VoiceApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with BroadcastError
pub type BroadcastResult<T> = Result<T, BroadcastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VoiceApiError::NotFound("call".to_string());
        assert_eq!(err.to_string(), "Resource not found: call");

        let err = ConfigError::MissingVar("TWILIO_AUTH_TOKEN".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: TWILIO_AUTH_TOKEN"
        );

        let err = BroadcastError::InvalidFileType;
        assert_eq!(err.to_string(), "Invalid file type. Please upload a CSV file.");

        let err = BroadcastError::MissingFromNumber;
        assert_eq!(err.to_string(), "No \"From\" phone number specified");
    }

    #[test]
    fn test_provider_error_variants() {
        let err = VoiceApiError::ProviderError {
            status: 400,
            code: Some(21211),
            message: "Invalid 'To' Phone Number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Provider error (status 400): Invalid 'To' Phone Number"
        );

        if let VoiceApiError::ProviderError { code, .. } = err {
            assert_eq!(code, Some(21211));
        }
    }

    #[test]
    fn test_load_error_wraps_into_broadcast_error() {
        let err: BroadcastError = ContactLoadError::Malformed {
            line: 3,
            message: "invalid utf-8".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Failed to load contacts: Malformed contact list at line 3: invalid utf-8"
        );
    }
}
