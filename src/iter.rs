//! Iteration surface (component G): all-cells, visible-only, and line
//! iterators over a [`crate::snapshot::Snapshot`].
//!
//! Grounded on `examples/original_source/annotated_string.h`'s
//! `AllIterator`, `Iterator` and `LineIterator` classes — in particular the
//! `MoveNext`/`MovePrev` skip-tombstone loop for the visible iterator.

use crate::id::Id;
use crate::snapshot::Snapshot;

/// Traverses every cell, visible or tombstoned.
pub struct AllIterator<'a> {
    snapshot: &'a Snapshot,
    pos: Id,
}

impl<'a> AllIterator<'a> {
    pub fn at(snapshot: &'a Snapshot, pos: Id) -> AllIterator<'a> {
        AllIterator { snapshot, pos }
    }

    pub fn id(&self) -> Id {
        self.pos
    }

    pub fn visible(&self) -> bool {
        self.snapshot.cell(self.pos).map_or(false, |c| c.visible)
    }

    pub fn chr(&self) -> Option<char> {
        self.snapshot.cell(self.pos).and_then(|c| c.chr)
    }

    pub fn move_next(&mut self) -> bool {
        match self.snapshot.cell(self.pos) {
            Some(cell) if self.pos != Id::END => {
                self.pos = cell.next;
                true
            }
            _ => false,
        }
    }

    pub fn move_prev(&mut self) -> bool {
        match self.snapshot.cell(self.pos) {
            Some(cell) if self.pos != Id::BEGIN => {
                self.pos = cell.prev;
                true
            }
            _ => false,
        }
    }
}

/// Traverses only visible (non-tombstoned) cells, skipping the rest.
pub struct VisibleIterator<'a> {
    inner: AllIterator<'a>,
}

impl<'a> VisibleIterator<'a> {
    pub fn at(snapshot: &'a Snapshot, pos: Id) -> VisibleIterator<'a> {
        let mut inner = AllIterator::at(snapshot, pos);
        while inner.pos != Id::BEGIN && !inner.visible() {
            inner.move_prev();
        }
        VisibleIterator { inner }
    }

    pub fn id(&self) -> Id {
        self.inner.id()
    }

    pub fn chr(&self) -> Option<char> {
        self.inner.chr()
    }

    pub fn move_next(&mut self) -> bool {
        loop {
            if !self.inner.move_next() {
                return false;
            }
            if self.inner.pos == Id::END || self.inner.visible() {
                return true;
            }
        }
    }

    pub fn move_prev(&mut self) -> bool {
        loop {
            if !self.inner.move_prev() {
                return false;
            }
            if self.inner.pos == Id::BEGIN || self.inner.visible() {
                return true;
            }
        }
    }
}

/// Walks the document by newline, using the secondary line-break index
/// rather than the character chain directly.
pub struct LineIterator<'a> {
    snapshot: &'a Snapshot,
    pos: Id,
}

impl<'a> LineIterator<'a> {
    /// Positions at the start of the line containing `at`, walking
    /// backward through the character chain to the nearest indexed
    /// newline (or `BEGIN`).
    pub fn at(snapshot: &'a Snapshot, at: Id) -> LineIterator<'a> {
        let mut pos = at;
        while snapshot.line_break(pos).is_none() {
            pos = match snapshot.cell(pos) {
                Some(cell) => cell.prev,
                None => Id::BEGIN,
            };
        }
        LineIterator { snapshot, pos }
    }

    pub fn id(&self) -> Id {
        self.pos
    }

    pub fn move_next(&mut self) -> bool {
        match self.snapshot.line_break(self.pos) {
            Some(entry) if self.pos != Id::END => {
                self.pos = entry.next;
                true
            }
            _ => false,
        }
    }

    pub fn move_prev(&mut self) -> bool {
        match self.snapshot.line_break(self.pos) {
            Some(entry) if self.pos != Id::BEGIN => {
                self.pos = entry.prev;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "iter_test.rs"]
mod iter_test;
