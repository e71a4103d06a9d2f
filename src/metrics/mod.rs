//! Basic metrics instrumentation for lookups.
//!
//! Counts fetches and lookup outcomes so that a transport failure can be told
//! apart from a genuine "not found".

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the fetcher, providers, and dispatcher.
#[derive(Debug, Clone)]
pub struct LookupMetrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Number of dispatcher resolutions
    lookups_total: Arc<AtomicU64>,

    /// Resolutions that produced a record
    lookup_hits_total: Arc<AtomicU64>,

    /// Resolutions where every provider came back empty
    lookup_misses_total: Arc<AtomicU64>,

    /// Provider lookups that failed on the wire
    transport_failures_total: Arc<AtomicU64>,

    /// Provider lookups that failed for configuration reasons
    provider_errors_total: Arc<AtomicU64>,
}

impl Default for LookupMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            lookups_total: Arc::new(AtomicU64::new(0)),
            lookup_hits_total: Arc::new(AtomicU64::new(0)),
            lookup_misses_total: Arc::new(AtomicU64::new(0)),
            transport_failures_total: Arc::new(AtomicU64::new(0)),
            provider_errors_total: Arc::new(AtomicU64::new(0)),
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

    /// Record the outcome of one dispatcher resolution.
    pub fn record_lookup(&self, hit: bool) {
        self.lookups_total.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.lookup_hits_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.lookup_misses_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a provider lookup absorbed after a transport failure.
    pub fn record_transport_failure(&self) {
        self.transport_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a provider that failed and was skipped.
    pub fn record_provider_error(&self) {
        self.provider_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

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

    pub fn lookups_total(&self) -> u64 {
        self.lookups_total.load(Ordering::Relaxed)
    }

    pub fn lookup_hits_total(&self) -> u64 {
        self.lookup_hits_total.load(Ordering::Relaxed)
    }

    pub fn lookup_misses_total(&self) -> u64 {
        self.lookup_misses_total.load(Ordering::Relaxed)
    }

    pub fn transport_failures_total(&self) -> u64 {
        self.transport_failures_total.load(Ordering::Relaxed)
    }

    pub fn provider_errors_total(&self) -> u64 {
        self.provider_errors_total.load(Ordering::Relaxed)
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        for counter in [
            &self.http_requests_total,
            &self.http_errors_total,
            &self.http_duration_total_ms,
            &self.lookups_total,
            &self.lookup_hits_total,
            &self.lookup_misses_total,
            &self.transport_failures_total,
            &self.provider_errors_total,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            lookups_total: self.lookups_total(),
            lookup_hits_total: self.lookup_hits_total(),
            lookup_misses_total: self.lookup_misses_total(),
            transport_failures_total: self.transport_failures_total(),
            provider_errors_total: self.provider_errors_total(),
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
    pub lookups_total: u64,
    pub lookup_hits_total: u64,
    pub lookup_misses_total: u64,
    pub transport_failures_total: u64,
    pub provider_errors_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: LookupMetrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: LookupMetrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) -> Duration {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        duration
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) -> Duration {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
        duration
    }
}
