//! Broadcast dispatch loop.

use crate::domain::PhoneNumber;
use crate::metrics::Metrics;
use crate::models::{BroadcastReport, BroadcastRequest, CallRequest, CallResult};
use crate::repositories::CallRepository;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Places one call per contact, strictly in order, one at a time.
///
/// A failed call is recorded against its contact and the loop moves on; the
/// report always holds exactly one result per contact, in contact order.
/// Nothing is retried.
pub struct BroadcastDispatcher {
    calls: Arc<dyn CallRepository>,
    metrics: Metrics,
}

impl BroadcastDispatcher {
    pub fn new(calls: Arc<dyn CallRepository>, metrics: Metrics) -> Self {
        Self { calls, metrics }
    }

    /// Dispatch a broadcast and collect its per-contact results.
    pub async fn dispatch(&self, request: &BroadcastRequest) -> BroadcastReport {
        let started_at = Utc::now();
        self.metrics.record_broadcast();

        info!(
            contacts = request.contacts.len(),
            from = %request.from,
            message_url = %request.message_url,
            "Starting broadcast"
        );

        let mut results = Vec::with_capacity(request.contacts.len());
        for contact in &request.contacts {
            results.push(self.place_call(contact, request).await);
        }

        let report = BroadcastReport::new(request, started_at, Utc::now(), results);

        info!(
            placed = report.placed_count(),
            failed = report.failed_count(),
            "Broadcast finished"
        );

        report
    }

    async fn place_call(&self, to: &PhoneNumber, request: &BroadcastRequest) -> CallResult {
        let call_request =
            CallRequest::new(to.clone(), request.from.clone(), request.message_url.clone());

        info!(to = %to, "Placing call");

        match self.calls.create(&call_request).await {
            Ok(call) => {
                self.metrics.record_call_placed();
                info!(to = %to, sid = %call.sid, status = %call.status, "Call initiated");
                CallResult::placed(to, &call)
            }
            Err(e) => {
                self.metrics.record_call_failed();
                warn!(to = %to, error = %e, "Failed to call contact");
                CallResult::failed(to, e.to_string())
            }
        }
    }
}
