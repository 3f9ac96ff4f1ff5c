//! Configuration management for the voice broadcast server.
//!
//! Configuration is resolved once at startup from environment variables (and an
//! optional `.env` file) and then passed explicitly to the components that need it.

use crate::domain::{MessageUrl, NormalizationPolicy};
use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default base URL of the voice provider REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twilio.com";

/// Configuration for the voice broadcast server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Voice provider API base URL
    pub api_base_url: String,

    /// Provider account SID
    pub account_sid: String,

    /// Provider auth token
    pub auth_token: String,

    /// Caller-ID used when the upload form does not provide one
    pub default_from_number: Option<String>,

    /// Message URL used when the upload form does not provide one
    pub default_message_url: Option<MessageUrl>,

    /// Whether contact entries are normalized (default: true)
    pub normalize_numbers: bool,

    /// Country calling code prefixed to domestic numbers (default: "1")
    pub default_country_code: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Address to bind the HTTP server to (default: 127.0.0.1)
    pub host: String,

    /// Port to bind the HTTP server to (default: 5000)
    pub port: u16,

    /// Maximum accepted size of an uploaded form field in bytes (default: 5 MiB)
    pub max_upload_bytes: usize,

    /// Log level used when RUST_LOG is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `TWILIO_ACCOUNT_SID`: Provider account SID
    /// - `TWILIO_AUTH_TOKEN`: Provider auth token
    ///
    /// Optional environment variables:
    /// - `TWILIO_API_BASE_URL`: Provider base URL (default: https://api.twilio.com)
    /// - `TWILIO_PHONE_NUMBER`: Default caller-ID number
    /// - `BROADCAST_MESSAGE_URL`: Default message URL
    /// - `NORMALIZE_NUMBERS`: Normalize contact entries (default: true)
    /// - `DEFAULT_COUNTRY_CODE`: Country code for domestic numbers (default: 1)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `HOST` / `PORT`: Bind address (default: 127.0.0.1:5000)
    /// - `MAX_UPLOAD_BYTES`: Upload size limit (default: 5242880)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let account_sid = Self::required_var("TWILIO_ACCOUNT_SID")?;
        let auth_token = Self::required_var("TWILIO_AUTH_TOKEN")?;

        let api_base_url =
            env::var("TWILIO_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "TWILIO_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let default_from_number = Self::optional_var("TWILIO_PHONE_NUMBER");

        let default_message_url = match Self::optional_var("BROADCAST_MESSAGE_URL") {
            Some(raw) => Some(MessageUrl::parse(&raw).map_err(|e| ConfigError::InvalidValue {
                var: "BROADCAST_MESSAGE_URL".to_string(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        let normalize_numbers = Self::parse_env_bool("NORMALIZE_NUMBERS", true)?;

        let default_country_code =
            env::var("DEFAULT_COUNTRY_CODE").unwrap_or_else(|_| "1".to_string());
        NormalizationPolicy::prefix(default_country_code.clone()).map_err(|e| {
            ConfigError::InvalidValue {
                var: "DEFAULT_COUNTRY_CODE".to_string(),
                reason: e.to_string(),
            }
        })?;

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = Self::parse_env_u16("PORT", 5000)?;
        let max_upload_bytes = Self::parse_env_usize("MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?;

        if max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_UPLOAD_BYTES".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            api_base_url,
            account_sid,
            auth_token,
            default_from_number,
            default_message_url,
            normalize_numbers,
            default_country_code,
            request_timeout,
            host,
            port,
            max_upload_bytes,
            log_level,
        })
    }

    /// The normalization policy selected by this configuration.
    pub fn normalization_policy(&self) -> NormalizationPolicy {
        if self.normalize_numbers {
            NormalizationPolicy::Prefix {
                country_code: self.default_country_code.clone(),
            }
        } else {
            NormalizationPolicy::Disabled
        }
    }

    /// `host:port` string for binding the HTTP server.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn required_var(var_name: &str) -> ConfigResult<String> {
        let value =
            env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))?;

        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Ok(value)
    }

    /// Unset and blank variables both count as absent.
    fn optional_var(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            account_sid: String::new(),
            auth_token: String::new(),
            default_from_number: None,
            default_message_url: None,
            normalize_numbers: true,
            default_country_code: "1".to_string(),
            request_timeout: 10,
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_upload_bytes: 5 * 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}
