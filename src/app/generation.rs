//! Latest-request-wins value slot.
//!
//! Each fetch takes a ticket with [`GenerationSlot::begin`] before its I/O
//! starts. When it completes, [`GenerationSlot::publish`] stores the result
//! only if no newer ticket has been issued in the meantime, so a superseded
//! fetch that finishes late never overwrites a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Identifies one started fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Holds the most recently published value, replaced wholesale.
///
/// Readers see either the previous value or the new one; values are behind
/// an `Arc` and never mutated in place.
pub struct GenerationSlot<T> {
    issued: AtomicU64,
    current: RwLock<Option<(Generation, Arc<T>)>>,
}

impl<T> Default for GenerationSlot<T> {
    fn default() -> Self {
        Self {
            issued: AtomicU64::new(0),
            current: RwLock::new(None),
        }
    }
}

impl<T> GenerationSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every ticket issued before.
    pub fn begin(&self) -> Generation {
        Generation(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `generation` is still the newest issued ticket.
    pub fn is_latest(&self, generation: Generation) -> bool {
        self.issued.load(Ordering::SeqCst) == generation.0
    }

    /// Stores `value` if `generation` has not been superseded.
    ///
    /// # Returns
    /// `true` if stored, `false` if the value was discarded as stale.
    pub fn publish(&self, generation: Generation, value: Arc<T>) -> bool {
        let mut current = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Checked under the write lock so two completions cannot interleave
        if !self.is_latest(generation) {
            return false;
        }
        *current = Some((generation, value));
        true
    }

    /// The resident value, if any.
    pub fn current(&self) -> Option<Arc<T>> {
        let current = match self.current.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        current.as_ref().map(|(_, value)| Arc::clone(value))
    }

    /// Drops the resident value and makes every outstanding ticket stale, so
    /// a fetch already in flight cannot repopulate the slot.
    pub fn supersede(&self) {
        let mut current = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.issued.fetch_add(1, Ordering::SeqCst);
        *current = None;
    }
}
