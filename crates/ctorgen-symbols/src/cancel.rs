//! Cooperative cancellation threaded through every engine operation.
//!
//! A single `CancelToken` is created per refactoring invocation and observed
//! at each externally-suspending point. Cancellation aborts the whole
//! invocation; no partial edits are ever materialized because edits are only
//! produced at the very end of a successful run.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// The invocation was cancelled. The only error the engine propagates;
/// everything else is a silent "offer nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Result of a cancellable operation.
pub type CancelResult<T> = Result<T, Cancelled>;

/// A cheaply clonable cancellation signal shared between the host and the
/// engine. Cloning hands out another observer of the same signal.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. All clones observe the signal.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Bail out with `Cancelled` if cancellation was requested. Intended for
    /// use with `?` at suspension points.
    pub fn check(&self) -> CancelResult<()> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}
