//! Concurrency helpers shared by the parallel algorithm executors.
//!
//! Algorithms in this crate never suspend mid-traversal: each per-source
//! unit runs to completion on one thread with thread-private state, and
//! the only blocking points are batch claims and the final reduction. The
//! cancellation signal here is the cooperative hook checked *between*
//! units, never inside one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cooperative cancellation signal.
///
/// Cheaply clonable; all clones observe the same flag. Timeouts are a
/// caller concern: drive one by cancelling from outside.
#[derive(Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Running units finish; no new unit starts.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
