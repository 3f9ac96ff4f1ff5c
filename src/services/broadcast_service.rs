//! Broadcast service layer.
//!
//! Validates an upload, resolves configured defaults, loads the contact list
//! and hands the result to the dispatcher.

use crate::broadcast::{BroadcastDispatcher, ContactLoader};
use crate::config::Config;
use crate::domain::{MessageUrl, NormalizationPolicy, PhoneNumber};
use crate::error::{BroadcastError, BroadcastResult, VoiceApiError, VoiceApiResult};
use crate::metrics::Metrics;
use crate::models::{BroadcastReport, BroadcastRequest, Call};
use crate::repositories::CallRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// File extensions accepted for contact lists.
const ALLOWED_EXTENSIONS: &[&str] = &["csv"];

/// An uploaded contact list.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied filename; may be empty when no file was selected
    pub filename: String,

    pub bytes: Vec<u8>,
}

/// Raw, unvalidated broadcast input as received from a form.
#[derive(Debug, Clone, Default)]
pub struct BroadcastSubmission {
    pub file: Option<UploadedFile>,
    pub from_number: Option<String>,
    pub message_url: Option<String>,
}

/// Values used when a submission leaves a field out.
#[derive(Debug, Clone, Default)]
pub struct BroadcastDefaults {
    pub from_number: Option<String>,
    pub message_url: Option<MessageUrl>,
    pub policy: NormalizationPolicy,
}

impl BroadcastDefaults {
    pub fn from_config(config: &Config) -> Self {
        Self {
            from_number: config.default_from_number.clone(),
            message_url: config.default_message_url.clone(),
            policy: config.normalization_policy(),
        }
    }
}

/// Broadcast service trait for business operations.
#[async_trait]
pub trait BroadcastService: Send + Sync {
    /// Validate a submission and run the broadcast.
    ///
    /// Every validation error is returned before any call is placed.
    async fn broadcast(&self, submission: BroadcastSubmission) -> BroadcastResult<BroadcastReport>;

    /// Look up a previously placed call.
    async fn call_status(&self, sid: &str) -> VoiceApiResult<Call>;
}

/// Default implementation of BroadcastService.
pub struct BroadcastServiceImpl {
    loader: ContactLoader,
    dispatcher: BroadcastDispatcher,
    calls: Arc<dyn CallRepository>,
    metrics: Metrics,
    default_from_number: Option<String>,
    default_message_url: Option<MessageUrl>,
}

impl BroadcastServiceImpl {
    /// Create a new broadcast service.
    pub fn new(calls: Arc<dyn CallRepository>, metrics: Metrics, defaults: BroadcastDefaults) -> Self {
        Self {
            loader: ContactLoader::new(defaults.policy),
            dispatcher: BroadcastDispatcher::new(calls.clone(), metrics.clone()),
            calls,
            metrics,
            default_from_number: defaults.from_number,
            default_message_url: defaults.message_url,
        }
    }

    /// Turn a submission into a dispatchable request.
    ///
    /// Checks run in a fixed order: file part, caller ID, selected file,
    /// extension, message URL, then the contact list itself. Unlike contacts,
    /// the caller ID must look dialable.
    pub fn prepare(&self, submission: BroadcastSubmission) -> BroadcastResult<BroadcastRequest> {
        let file = submission.file.ok_or(BroadcastError::MissingFile)?;

        let from_raw = non_blank(submission.from_number)
            .or_else(|| self.default_from_number.clone())
            .ok_or(BroadcastError::MissingFromNumber)?;
        let from = PhoneNumber::new(from_raw.clone())
            .ok()
            .filter(PhoneNumber::looks_dialable)
            .ok_or(BroadcastError::InvalidFromNumber(from_raw))?;

        if file.filename.trim().is_empty() {
            return Err(BroadcastError::NoSelectedFile);
        }

        if !allowed_file(&file.filename) {
            return Err(BroadcastError::InvalidFileType);
        }

        let message_url = match non_blank(submission.message_url) {
            Some(raw) => {
                MessageUrl::parse(&raw).map_err(|_| BroadcastError::InvalidMessageUrl(raw))?
            }
            None => self
                .default_message_url
                .clone()
                .ok_or(BroadcastError::MissingMessageUrl)?,
        };

        let contacts = self.loader.load_bytes(&file.bytes)?;
        self.metrics.record_contacts_loaded(contacts.len());

        info!(
            filename = %file.filename,
            contacts = contacts.len(),
            "Contact list accepted"
        );

        Ok(BroadcastRequest {
            from,
            message_url,
            contacts,
        })
    }
}

#[async_trait]
impl BroadcastService for BroadcastServiceImpl {
    async fn broadcast(&self, submission: BroadcastSubmission) -> BroadcastResult<BroadcastReport> {
        let request = self.prepare(submission)?;
        Ok(self.dispatcher.dispatch(&request).await)
    }

    async fn call_status(&self, sid: &str) -> VoiceApiResult<Call> {
        if sid.trim().is_empty() {
            return Err(VoiceApiError::InvalidRequest(
                "Call SID cannot be empty".to_string(),
            ));
        }

        self.calls.get(sid.trim()).await
    }
}

/// Whether the filename carries an accepted extension (case-insensitive).
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
