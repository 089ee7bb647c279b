//! ObservationScope for automatic start/complete logging
//!
//! - Logs `status=start` on creation
//! - Logs `status=ok` with the elapsed time on `complete()`
//! - Logs `status=error` on `fail()`
//! - Logs `status=incomplete` if dropped without either

use std::time::Instant;

use super::events::Event;

/// A scope that logs the start and outcome of one operation
///
/// # Usage
///
/// ```ignore
/// let scope = ObservationScope::with_detail(Event::DbOpen, "file");
/// // ... do work ...
/// scope.complete();
/// ```
pub struct ObservationScope {
    event: Event,
    detail: String,
    started_at: Instant,
    finished: bool,
}

impl ObservationScope {
    /// Create a new observation scope
    pub fn new(event: Event) -> Self {
        Self::with_detail(event, "")
    }

    /// Create a new observation scope carrying a short detail value
    pub fn with_detail(event: Event, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        tracing::info!(event = event.as_str(), status = "start", detail = %detail);

        Self {
            event,
            detail,
            started_at: Instant::now(),
            finished: false,
        }
    }

    /// Mark the scope as successfully completed
    pub fn complete(mut self) {
        self.finished = true;
        tracing::info!(
            event = self.event.as_str(),
            status = "ok",
            detail = %self.detail,
            duration_ms = self.elapsed_ms(),
        );
    }

    /// Mark the scope as failed with a reason
    pub fn fail(mut self, reason: &str) {
        self.finished = true;
        tracing::error!(
            event = self.event.as_str(),
            status = "error",
            detail = %self.detail,
            duration_ms = self.elapsed_ms(),
            reason,
        );
    }

    /// Milliseconds since the scope was opened
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.is_finished() {
            tracing::warn!(
                event = self.event.as_str(),
                status = "incomplete",
                detail = %self.detail,
            );
        }
    }
}
