//! Basic metrics instrumentation for tracking performance.
//!
//! Provides counters and duration tracking for provider requests and broadcasts.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared between the provider client and the dispatcher.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made to the provider
    http_requests_total: Arc<AtomicU64>,

    /// Total number of provider HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all provider requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Number of broadcasts dispatched
    broadcasts_total: Arc<AtomicU64>,

    /// Number of contacts loaded from uploaded lists
    contacts_loaded_total: Arc<AtomicU64>,

    /// Number of calls accepted by the provider
    calls_placed_total: Arc<AtomicU64>,

    /// Number of call attempts that failed
    calls_failed_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            broadcasts_total: Arc::new(AtomicU64::new(0)),
            contacts_loaded_total: Arc::new(AtomicU64::new(0)),
            calls_placed_total: Arc::new(AtomicU64::new(0)),
            calls_failed_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_broadcast(&self) {
        self.broadcasts_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_contacts_loaded(&self, count: usize) {
        self.contacts_loaded_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_call_placed(&self) {
        self.calls_placed_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_call_failed(&self) {
        self.calls_failed_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn broadcasts_total(&self) -> u64 {
        self.broadcasts_total.load(Ordering::Relaxed)
    }

    pub fn contacts_loaded_total(&self) -> u64 {
        self.contacts_loaded_total.load(Ordering::Relaxed)
    }

    pub fn calls_placed_total(&self) -> u64 {
        self.calls_placed_total.load(Ordering::Relaxed)
    }

    pub fn calls_failed_total(&self) -> u64 {
        self.calls_failed_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            broadcasts_total: self.broadcasts_total(),
            contacts_loaded_total: self.contacts_loaded_total(),
            calls_placed_total: self.calls_placed_total(),
            calls_failed_total: self.calls_failed_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub broadcasts_total: u64,
    pub contacts_loaded_total: u64,
    pub calls_placed_total: u64,
    pub calls_failed_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.http_requests_total(), 0);
        assert_eq!(metrics.http_errors_total(), 0);
        assert_eq!(metrics.calls_placed_total(), 0);
    }

    #[test]
    fn test_average_duration() {
        let metrics = Metrics::new();
        metrics.record_http_request(Duration::from_millis(100));
        metrics.record_http_request(Duration::from_millis(200));
        assert_eq!(metrics.http_requests_total(), 2);
        assert_eq!(metrics.http_duration_total_ms(), 300);
        assert_eq!(metrics.http_duration_avg_ms(), 150.0);
    }

    #[test]
    fn test_summary() {
        let metrics = Metrics::new();
        metrics.record_broadcast();
        metrics.record_contacts_loaded(3);
        metrics.record_call_placed();
        metrics.record_call_placed();
        metrics.record_call_failed();

        let summary = metrics.summary();
        assert_eq!(summary.broadcasts_total, 1);
        assert_eq!(summary.contacts_loaded_total, 3);
        assert_eq!(summary.calls_placed_total, 2);
        assert_eq!(summary.calls_failed_total, 1);
        assert_eq!(summary.http_duration_avg_ms, 0.0);
    }

    #[test]
    fn test_http_timer_with_error() {
        let metrics = Metrics::new();
        let timer = HttpTimer::new(metrics.clone());
        timer.complete_with_error();

        assert_eq!(metrics.http_requests_total(), 1);
        assert_eq!(metrics.http_errors_total(), 1);
    }

    #[test]
    fn test_concurrent_access() {
        let metrics = Metrics::new();
        let metrics1 = metrics.clone();
        let metrics2 = metrics.clone();

        let handle1 = thread::spawn(move || {
            for _ in 0..100 {
                metrics1.record_call_placed();
            }
        });

        let handle2 = thread::spawn(move || {
            for _ in 0..100 {
                metrics2.record_call_placed();
            }
        });

        handle1.join().unwrap();
        handle2.join().unwrap();

        assert_eq!(metrics.calls_placed_total(), 200);
    }
}
