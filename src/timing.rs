use std::time::{Duration, Instant};

/// Logs how long a scope took when it is dropped.
///
/// The notice is emitted on every exit path, including early returns, so it
/// doubles as a "finished attempt" marker for fallible operations.
#[must_use = "the timer logs when dropped; bind it to a named variable"]
pub(crate) struct ScopedTimer {
    operation: &'static str,
    target: String,
    start: Instant,
}

impl ScopedTimer {
    pub(crate) fn start(operation: &'static str, target: impl Into<String>) -> Self {
        Self {
            operation,
            target: target.into(),
            start: Instant::now(),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        tracing::debug!(
            operation = self.operation,
            path = %self.target,
            elapsed_ms = self.elapsed().as_secs_f64() * 1000.0,
            "finished attempt to {} {}",
            self.operation,
            self.target,
        );
    }
}
