//! Async wrapper around synchronous VoiceClient.
//!
//! This module provides an async interface to the synchronous VoiceClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the server's event loop.

use crate::client::VoiceClient;
use crate::error::{VoiceApiError, VoiceApiResult};
use crate::models::{Call, CallRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for voice provider operations.
#[async_trait]
pub trait AsyncVoiceClient: Send + Sync {
    async fn create_call(&self, request: &CallRequest) -> VoiceApiResult<Call>;
    async fn fetch_call(&self, call_sid: &str) -> VoiceApiResult<Call>;
}

/// Async wrapper around synchronous VoiceClient.
#[derive(Clone)]
pub struct AsyncVoiceClientImpl {
    client: Arc<VoiceClient>,
}

impl AsyncVoiceClientImpl {
    pub fn new(client: VoiceClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// Run a blocking provider operation on tokio's blocking pool.
///
/// A panic inside `op` is reported as an `HttpError` for that operation only.
async fn run_blocking<T, F>(op: F) -> VoiceApiResult<T>
where
    F: FnOnce() -> VoiceApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| VoiceApiError::HttpError(format!("Task join error: {}", e)))?
}

#[async_trait]
impl AsyncVoiceClient for AsyncVoiceClientImpl {
    async fn create_call(&self, request: &CallRequest) -> VoiceApiResult<Call> {
        let client = self.client.clone();
        let request = request.clone();

        run_blocking(move || client.create_call(&request)).await
    }

    async fn fetch_call(&self, call_sid: &str) -> VoiceApiResult<Call> {
        let client = self.client.clone();
        let call_sid = call_sid.to_string();

        run_blocking(move || client.fetch_call(&call_sid)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_panicking_operation_becomes_error() {
        let result: VoiceApiResult<Call> = run_blocking(|| panic!("provider client bug")).await;

        match result {
            Err(VoiceApiError::HttpError(msg)) => assert!(msg.contains("Task join error")),
            other => panic!("Expected HttpError, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blocking_pool_survives_panicked_operation() {
        let _ = run_blocking::<Call, _>(|| panic!("provider client bug")).await;

        let call = run_blocking(|| {
            Ok(Call {
                sid: "CA1".to_string(),
                status: "queued".to_string(),
                ..Default::default()
            })
        })
        .await
        .unwrap();

        assert_eq!(call.sid, "CA1");
    }
}
