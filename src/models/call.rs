//! Call models: the provider's call resource and the per-contact dispatch outcome.

use crate::domain::{MessageUrl, PhoneNumber};
use serde::{Deserialize, Serialize};

/// Status recorded for a contact whose call could not be created.
pub const FAILED_STATUS: &str = "failed";

/// Parameters for creating one outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    /// Destination number
    pub to: PhoneNumber,

    /// Caller-ID number presented to the callee
    pub from: PhoneNumber,

    /// Audio or call-instruction document fetched when the call connects
    pub url: MessageUrl,
}

impl CallRequest {
    pub fn new(to: PhoneNumber, from: PhoneNumber, url: MessageUrl) -> Self {
        Self { to, from, url }
    }

    /// Form fields expected by the provider's call creation endpoint.
    pub fn form_params(&self) -> [(&'static str, &str); 3] {
        [
            ("To", self.to.as_str()),
            ("From", self.from.as_str()),
            ("Url", self.url.as_str()),
        ]
    }
}

/// A call resource as reported by the voice provider.
///
/// Only `sid` and `status` are relied upon; everything else is informational
/// and may be missing depending on the call's progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Call {
    /// Provider-assigned call identifier
    pub sid: String,

    /// Provider-reported status (e.g. "queued", "ringing", "completed")
    pub status: String,

    #[serde(default)]
    pub to: Option<String>,

    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub direction: Option<String>,

    #[serde(default)]
    pub date_created: Option<String>,

    #[serde(default)]
    pub start_time: Option<String>,

    #[serde(default)]
    pub end_time: Option<String>,

    /// Duration in seconds, as a string
    #[serde(default)]
    pub duration: Option<String>,

    #[serde(default)]
    pub price: Option<String>,
}

/// What happened when a call was requested for one contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CallOutcome {
    /// The provider accepted the call
    Placed { sid: String },

    /// The request failed; the contact was skipped
    Failed { error: String },
}

/// Outcome record for one attempted contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallResult {
    /// Destination number as dispatched
    pub to: String,

    /// Provider-reported status, or `"failed"`
    pub status: String,

    #[serde(flatten)]
    pub outcome: CallOutcome,
}

impl CallResult {
    /// Record a call the provider accepted.
    pub fn placed(to: &PhoneNumber, call: &Call) -> Self {
        Self {
            to: to.as_str().to_string(),
            status: call.status.clone(),
            outcome: CallOutcome::Placed {
                sid: call.sid.clone(),
            },
        }
    }

    /// Record a failed call attempt.
    pub fn failed(to: &PhoneNumber, error: impl Into<String>) -> Self {
        Self {
            to: to.as_str().to_string(),
            status: FAILED_STATUS.to_string(),
            outcome: CallOutcome::Failed {
                error: error.into(),
            },
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self.outcome, CallOutcome::Placed { .. })
    }

    /// Provider call identifier, if the call was placed.
    pub fn sid(&self) -> Option<&str> {
        match &self.outcome {
            CallOutcome::Placed { sid } => Some(sid),
            CallOutcome::Failed { .. } => None,
        }
    }

    /// Error description, if the call failed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            CallOutcome::Placed { .. } => None,
            CallOutcome::Failed { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(s: &str) -> PhoneNumber {
        PhoneNumber::new(s).unwrap()
    }

    #[test]
    fn test_call_deserialization_ignores_unknown_fields() {
        let json = r#"{
            "sid": "CA0123456789abcdef0123456789abcdef",
            "status": "queued",
            "to": "+15551234567",
            "from": "+15550000000",
            "direction": "outbound-api",
            "api_version": "2010-04-01",
            "duration": null,
            "price": null
        }"#;

        let call: Call = serde_json::from_str(json).unwrap();
        assert_eq!(call.sid, "CA0123456789abcdef0123456789abcdef");
        assert_eq!(call.status, "queued");
        assert_eq!(call.direction.as_deref(), Some("outbound-api"));
        assert_eq!(call.duration, None);
    }

    #[test]
    fn test_placed_result_serialization() {
        let call = Call {
            sid: "CA1".to_string(),
            status: "queued".to_string(),
            ..Default::default()
        };
        let result = CallResult::placed(&phone("+15551234567"), &call);

        assert!(result.is_placed());
        assert_eq!(result.sid(), Some("CA1"));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"to": "+15551234567", "status": "queued", "sid": "CA1"})
        );
    }

    #[test]
    fn test_failed_result_serialization() {
        let result = CallResult::failed(&phone("+15559876543"), "Authentication failed");

        assert!(!result.is_placed());
        assert_eq!(result.status, FAILED_STATUS);
        assert_eq!(result.error(), Some("Authentication failed"));
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "to": "+15559876543",
                "status": "failed",
                "error": "Authentication failed"
            })
        );
    }

    #[test]
    fn test_call_request_form_params() {
        let request = CallRequest::new(
            phone("+15551234567"),
            phone("+15550000000"),
            MessageUrl::parse("https://example.com/twiml.xml").unwrap(),
        );
        assert_eq!(
            request.form_params(),
            [
                ("To", "+15551234567"),
                ("From", "+15550000000"),
                ("Url", "https://example.com/twiml.xml"),
            ]
        );
    }
}
