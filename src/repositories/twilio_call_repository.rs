use crate::client::AsyncVoiceClient;
use crate::error::VoiceApiResult;
use crate::models::{Call, CallRequest};
use crate::repositories::traits::CallRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Call repository implementation using the Twilio-compatible API client.
///
/// This repository delegates all operations to the AsyncVoiceClient,
/// providing a clean abstraction layer between the broadcast logic and
/// the underlying HTTP client.
pub struct TwilioCallRepository {
    client: Arc<dyn AsyncVoiceClient>,
}

impl TwilioCallRepository {
    /// Create a new TwilioCallRepository with the given client.
    pub fn new(client: Arc<dyn AsyncVoiceClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CallRepository for TwilioCallRepository {
    async fn create(&self, request: &CallRequest) -> VoiceApiResult<Call> {
        self.client.create_call(request).await
    }

    async fn get(&self, sid: &str) -> VoiceApiResult<Call> {
        self.client.fetch_call(sid).await
    }
}
