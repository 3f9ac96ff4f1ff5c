use crate::error::VoiceApiResult;
use crate::models::{Call, CallRequest};
use async_trait::async_trait;

/// Repository for outbound calls.
///
/// Provides abstraction over the voice provider, enabling different
/// implementations (API client, mock).
#[async_trait]
pub trait CallRepository: Send + Sync {
    /// Ask the provider to place a call.
    async fn create(&self, request: &CallRequest) -> VoiceApiResult<Call>;

    /// Retrieve the provider's current view of a previously placed call.
    async fn get(&self, sid: &str) -> VoiceApiResult<Call>;
}
