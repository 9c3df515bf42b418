//! Debouncing for the search input.

use std::time::{Duration, Instant};

/// Emits the latest observed value once it has stopped changing for a quiet
/// interval, and never emits the same value twice in a row.
///
/// Poll-driven: the caller reports every edit through [`observe`] and calls
/// [`poll`] on each tick. Intermediate values that existed only while typing
/// are never emitted.
///
/// [`observe`]: QueryDebouncer::observe
/// [`poll`]: QueryDebouncer::poll
pub struct QueryDebouncer {
    interval: Duration,
    pending: Option<String>,
    changed_at: Option<Instant>,
    settled: String,
}

impl QueryDebouncer {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            changed_at: None,
            settled: String::new(),
        }
    }

    /// Record the current input value. Restarts the quiet interval whenever
    /// the value differs from the pending candidate.
    pub fn observe(&mut self, value: &str) {
        if self.pending.as_deref() == Some(value) {
            return;
        }
        self.pending = Some(value.to_string());
        self.changed_at = Some(Instant::now());
    }

    /// Emit the pending value if it has been quiet long enough and differs
    /// from the last emitted one.
    pub fn poll(&mut self) -> Option<String> {
        if self.changed_at?.elapsed() < self.interval {
            return None;
        }
        self.take_pending()
    }

    /// Emit the pending value immediately, skipping the remaining quiet time.
    pub fn flush(&mut self) -> Option<String> {
        self.take_pending()
    }

    /// Mark a value as already emitted, without emitting it. Used to seed the
    /// debouncer when the initial fetch is dispatched elsewhere.
    pub fn settle_on(&mut self, value: &str) {
        self.pending = None;
        self.changed_at = None;
        self.settled = value.to_string();
    }

    fn take_pending(&mut self) -> Option<String> {
        self.changed_at = None;
        let value = self.pending.take()?;
        if value == self.settled {
            return None;
        }
        self.settled = value.clone();
        Some(value)
    }
}
