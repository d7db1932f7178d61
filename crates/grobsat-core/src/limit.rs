//! Cooperative cancellation.
//!
//! The engine polls a [`ResLimit`] at step boundaries. The flag is atomic so
//! a watchdog thread holding an `Arc<ResLimit>` may cancel a running
//! saturation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// A cancellation flag with an optional step budget.
#[derive(Debug, Default)]
pub struct ResLimit {
    canceled: AtomicBool,
    steps: AtomicU64,
    max_steps: Option<u64>,
}

impl ResLimit {
    /// A limit that never fires on its own.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A limit that fires once `max_steps` calls to [`ResLimit::inc`] happened.
    #[must_use]
    pub fn with_max_steps(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
            ..Self::default()
        }
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Relaxed);
    }

    /// Clears a previous cancellation and the step count.
    pub fn reset(&self) {
        self.canceled.store(false, Ordering::Relaxed);
        self.steps.store(0, Ordering::Relaxed);
    }

    /// Counts one unit of work. Returns `false` once the limit has fired.
    pub fn inc(&self) -> bool {
        let steps = self.steps.fetch_add(1, Ordering::Relaxed) + 1;
        if self.max_steps.is_some_and(|max| steps > max) {
            self.cancel();
        }
        !self.is_canceled()
    }

    /// Units of work counted so far.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::Relaxed)
    }

    /// True once cancelled, explicitly or by the step budget.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_step_budget() {
        let limit = ResLimit::with_max_steps(2);
        assert!(limit.inc());
        assert!(limit.inc());
        assert!(!limit.inc());
        assert!(limit.is_canceled());

        limit.reset();
        assert!(!limit.is_canceled());
        assert_eq!(limit.steps(), 0);
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let limit = Arc::new(ResLimit::new());
        let remote = Arc::clone(&limit);
        std::thread::spawn(move || remote.cancel())
            .join()
            .unwrap();
        assert!(limit.is_canceled());
        assert!(!limit.inc());
    }
}
