//! HTTP client for the voice provider's REST API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles authentication and error mapping
//! for the two call operations the broadcaster needs: creating a call and fetching one.

mod async_wrapper;
pub use async_wrapper::{AsyncVoiceClient, AsyncVoiceClientImpl};

use crate::config::Config;
use crate::error::{VoiceApiError, VoiceApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{Call, CallRequest};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// API version segment of every provider path.
const API_VERSION: &str = "2010-04-01";

/// Error body returned by the provider on 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(default)]
    code: Option<u32>,

    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the voice provider.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct VoiceClient {
    /// Base URL for the provider API
    base_url: String,

    /// Account SID, also used as the basic auth user
    account_sid: String,

    /// Precomputed `Authorization` header value
    auth_header: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl VoiceClient {
    /// Create a new VoiceClient from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_base_url.clone(),
            account_sid: config.account_sid.clone(),
            auth_header: basic_auth(&config.account_sid, &config.auth_token),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a VoiceClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, account_sid: String, auth_token: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            auth_header: basic_auth(&account_sid, &auth_token),
            account_sid,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL for a path under the account resource.
    fn account_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!(
            "{}/{}/Accounts/{}/{}",
            base,
            API_VERSION,
            urlencoding::encode(&self.account_sid),
            path
        )
    }

    /// Record the request outcome against the timer and map transport errors.
    fn finish(
        &self,
        timer: HttpTimer,
        result: Result<ureq::Response, ureq::Error>,
    ) -> VoiceApiResult<ureq::Response> {
        match result {
            Ok(response) => {
                timer.complete();
                Ok(response)
            }
            Err(e) => {
                timer.complete_with_error();
                Err(self.map_error(e))
            }
        }
    }

    /// Execute a GET request with authentication.
    fn get(&self, path: &str) -> VoiceApiResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.account_url(path);

        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .set("Authorization", &self.auth_header)
            .set("Accept", "application/json")
            .call();

        self.finish(timer, result)
    }

    /// Execute a form-encoded POST request with authentication.
    fn post_form(&self, path: &str, form: &[(&str, &str)]) -> VoiceApiResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.account_url(path);

        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("Authorization", &self.auth_header)
            .set("Accept", "application/json")
            .send_form(form);

        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status())
            }
            Err(e) => tracing::debug!("POST {} - Error: {}", url, e),
        }

        self.finish(timer, result)
    }

    /// Map a ureq error to a VoiceApiError.
    fn map_error(&self, error: ureq::Error) -> VoiceApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => VoiceApiError::Unauthorized,
                    404 => VoiceApiError::NotFound(Self::error_message(&body).1),
                    429 => VoiceApiError::RateLimitExceeded,
                    _ => {
                        let (provider_code, message) = Self::error_message(&body);
                        VoiceApiError::ProviderError {
                            status: code,
                            code: provider_code,
                            message,
                        }
                    }
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    VoiceApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    VoiceApiError::Timeout
                } else {
                    VoiceApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Extract the provider error code and message, falling back to the raw body.
    fn error_message(body: &str) -> (Option<u32>, String) {
        match serde_json::from_str::<ProviderErrorBody>(body) {
            Ok(ProviderErrorBody {
                code,
                message: Some(message),
            }) => (code, message),
            Ok(ProviderErrorBody { code, message: None }) => (code, body.to_string()),
            Err(_) => (None, body.to_string()),
        }
    }

    fn parse_call(response: ureq::Response) -> VoiceApiResult<Call> {
        let body = response
            .into_string()
            .map_err(|e| VoiceApiError::HttpError(e.to_string()))?;
        serde_json::from_str::<Call>(&body).map_err(VoiceApiError::JsonError)
    }

    // ========================= Call Operations =========================

    /// Create an outbound call.
    ///
    /// The provider fetches `request.url` when the callee answers.
    pub fn create_call(&self, request: &CallRequest) -> VoiceApiResult<Call> {
        let response = self.post_form("Calls.json", &request.form_params())?;
        Self::parse_call(response)
    }

    /// Fetch a previously created call by its SID.
    pub fn fetch_call(&self, call_sid: &str) -> VoiceApiResult<Call> {
        if call_sid.trim().is_empty() {
            return Err(VoiceApiError::InvalidRequest(
                "Call SID cannot be empty".to_string(),
            ));
        }

        let path = format!("Calls/{}.json", urlencoding::encode(call_sid));
        let response = self.get(&path)?;
        Self::parse_call(response)
    }
}

/// `Basic` authorization header value for the given credentials.
fn basic_auth(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, password)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header() {
        assert_eq!(basic_auth("AC123", "secret"), "Basic QUMxMjM6c2VjcmV0");
    }

    #[test]
    fn test_account_url() {
        let client = VoiceClient::with_base_url(
            "https://api.example.com/".to_string(),
            "AC123".to_string(),
            "secret".to_string(),
        );
        assert_eq!(
            client.account_url("/Calls.json"),
            "https://api.example.com/2010-04-01/Accounts/AC123/Calls.json"
        );
    }

    #[test]
    fn test_error_message_parsing() {
        let body = r#"{"code": 21211, "message": "Invalid 'To' Phone Number", "status": 400}"#;
        assert_eq!(
            VoiceClient::error_message(body),
            (Some(21211), "Invalid 'To' Phone Number".to_string())
        );

        assert_eq!(
            VoiceClient::error_message("gateway exploded"),
            (None, "gateway exploded".to_string())
        );
    }

    #[test]
    fn test_fetch_call_rejects_empty_sid() {
        let client = VoiceClient::new(&Config::default(), Metrics::new());
        assert!(matches!(
            client.fetch_call("  "),
            Err(VoiceApiError::InvalidRequest(_))
        ));
        assert_eq!(client.metrics().http_requests_total(), 0);
    }
}
