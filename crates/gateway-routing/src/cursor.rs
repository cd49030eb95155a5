//! Round-robin cursor.

use std::sync::atomic::{AtomicIsize, Ordering};

/// Index of the provider used by the most recent attempt.
///
/// Process-wide and shared by concurrent sweeps. Reads and writes are
/// individually atomic but a sweep's read-then-write is not, so concurrent
/// round-robin requests may skip or repeat a provider. The index is only
/// meaningful relative to the matching set that produced it.
#[derive(Debug)]
pub struct FailoverCursor {
    last: AtomicIsize,
}

impl FailoverCursor {
    /// Value before any attempt has been made
    pub const UNSET: isize = -1;

    /// Create a cursor in the unset state
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: AtomicIsize::new(Self::UNSET),
        }
    }

    /// Last index written, or [`Self::UNSET`]
    pub fn position(&self) -> isize {
        self.last.load(Ordering::Relaxed)
    }

    pub(crate) fn set(&self, index: usize) {
        self.last.store(index as isize, Ordering::Relaxed);
    }
}

impl Default for FailoverCursor {
    fn default() -> Self {
        Self::new()
    }
}
