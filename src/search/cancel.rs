use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Cooperative stop signal shared between a solve and whoever drives it.
///
/// Solvers poll the token between evaluations and return the best route
/// known so far once it fires.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Returns a token that reports cancelled once `limit` has passed.
    ///
    /// The deadline is checked on every poll; clones share both the flag and
    /// the deadline.
    pub fn with_deadline(limit: Duration) -> Self {
        CancelToken {
            cancelled: Arc::default(),
            deadline: Instant::now().checked_add(limit),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
