//! Convenience mutable wrapper over a [`Snapshot`] for callers who want one
//! shared handle to "the current state" instead of threading snapshots by
//! hand.
//!
//! `integrate` itself is pure (see `crate::snapshot`); nothing in the core
//! requires this wrapper. It exists because a typical embedding (an editor
//! process with several collaborator threads feeding it command batches)
//! wants a single `Arc`-shared handle it can read from any thread without
//! taking turns passing a value around.
//!
//! Grounded on `examples/prataprc-rdms/src/llrb/mdb.rs`'s
//! `Arc<Spinlock<Arc<Inner<K,V,D>>>>` MVCC idiom; reuses
//! `crate::util::Spinlock` directly.

use std::sync::Arc;

use crate::command::CommandSet;
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::util::Spinlock;

/// A shared, thread-safe handle to the current snapshot of a document.
/// Readers take a read-latch (non-blocking with respect to other readers);
/// writers serialize behind the write-latch, compute the new snapshot, and
/// publish it.
pub struct Document {
    current: Spinlock<Arc<Snapshot>>,
}

impl Document {
    pub fn new() -> Document {
        Document { current: Spinlock::new(Arc::new(Snapshot::new())) }
    }

    /// A cheap `Arc` clone of the current snapshot, for rendering or
    /// forking without blocking writers for longer than the clone.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    /// Integrates `batch` against the current snapshot and publishes the
    /// result. On error, the published snapshot is unchanged.
    pub fn apply(&self, batch: &CommandSet) -> Result<Arc<Snapshot>> {
        let mut guard = self.current.write();
        let next = Arc::new(guard.integrate(batch)?);
        *guard = Arc::clone(&next);
        Ok(next)
    }
}

impl Default for Document {
    fn default() -> Document {
        Document::new()
    }
}

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;
