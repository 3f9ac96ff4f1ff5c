use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use voice_broadcast_server::error::{VoiceApiError, VoiceApiResult};
use voice_broadcast_server::models::{Call, CallRequest};
use voice_broadcast_server::repositories::CallRepository;

/// Mock call repository for testing.
///
/// Accepts every call except those to numbers registered with `fail_number`,
/// and remembers every request in the order it was made.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockCallRepository {
    requests: Arc<Mutex<Vec<CallRequest>>>,
    calls: Arc<Mutex<HashMap<String, Call>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockCallRepository {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Make every call to `number` fail with a provider rejection.
    pub fn fail_number(&self, number: &str) {
        let mut failing = self.failing.lock().unwrap();
        failing.insert(number.to_string());
    }

    /// Register a call so `get` can find it.
    pub fn add_call(&self, call: Call) {
        let mut calls = self.calls.lock().unwrap();
        calls.insert(call.sid.clone(), call);
    }

    /// Destinations requested so far, in order.
    pub fn requested_numbers(&self) -> Vec<String> {
        let requests = self.requests.lock().unwrap();
        requests.iter().map(|r| r.to.as_str().to_string()).collect()
    }

    pub fn requests(&self) -> Vec<CallRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockCallRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CallRepository for MockCallRepository {
    async fn create(&self, request: &CallRequest) -> VoiceApiResult<Call> {
        self.track_call("create");

        let position = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        if self.failing.lock().unwrap().contains(request.to.as_str()) {
            return Err(VoiceApiError::ProviderError {
                status: 400,
                code: Some(21211),
                message: format!("The 'To' number {} is not a valid phone number.", request.to),
            });
        }

        let call = Call {
            sid: format!("CA{:032}", position),
            status: "queued".to_string(),
            to: Some(request.to.as_str().to_string()),
            from: Some(request.from.as_str().to_string()),
            direction: Some("outbound-api".to_string()),
            ..Default::default()
        };

        self.add_call(call.clone());
        Ok(call)
    }

    async fn get(&self, sid: &str) -> VoiceApiResult<Call> {
        self.track_call("get");

        let calls = self.calls.lock().unwrap();
        calls
            .get(sid)
            .cloned()
            .ok_or_else(|| VoiceApiError::NotFound(format!("Call {} not found", sid)))
    }
}
