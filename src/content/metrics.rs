//! Content-source health counters.
//!
//! Accessors turn content-source failures into empty results; these counters
//! keep those failures visible. One instance is owned by each `ContentClient`.

use crate::error::Error;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct ContentMetrics {
    /// Requests sent to the content API
    requests: AtomicUsize,

    /// Responses with a non-success status
    fetch_failures: AtomicUsize,

    /// Success responses whose body could not be decoded
    decode_failures: AtomicUsize,

    /// Requests that never produced a response
    transport_failures: AtomicUsize,

    /// Accessor calls that fell back to an empty result
    fallbacks: AtomicUsize,
}

impl ContentMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a failed request under its error kind.
    ///
    /// # Arguments
    /// * `error` - The error returned by the content client
    ///
    /// Errors raised before a request is sent (unsupported locale, bad
    /// endpoint) are not counted.
    pub fn record_failure(&self, error: &Error) {
        let counter = match error {
            Error::Fetch { .. } => &self.fetch_failures,
            Error::Decode(_) => &self.decode_failures,
            Error::Transport(_) => &self.transport_failures,
            // Rejected before any request was sent
            Error::UnsupportedLocale(_) | Error::Config(_) => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures.load(Ordering::Relaxed)
    }

    pub fn decode_failures(&self) -> usize {
        self.decode_failures.load(Ordering::Relaxed)
    }

    pub fn transport_failures(&self) -> usize {
        self.transport_failures.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    ///
    /// # Returns
    /// A `MetricsReport` snapshot. `success_rate` is 0.0 until the first
    /// request has been sent.
    pub fn report(&self) -> MetricsReport {
        let requests = self.requests();
        let fetch_failures = self.fetch_failures();
        let decode_failures = self.decode_failures();
        let transport_failures = self.transport_failures();
        let failures = fetch_failures + decode_failures + transport_failures;

        let success_rate = if requests > 0 {
            (requests.saturating_sub(failures) as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            requests,
            fetch_failures,
            decode_failures,
            transport_failures,
            fallbacks: self.fallbacks(),
            success_rate,
        }
    }
}

/// Snapshot of the content-source counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub requests: usize,
    pub fetch_failures: usize,
    pub decode_failures: usize,
    pub transport_failures: usize,
    pub fallbacks: usize,

    /// Successful requests as a percentage (0-100)
    pub success_rate: f64,
}
