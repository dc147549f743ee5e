//! Character cell and line-break index entry (components C/E).
//!
//! Grounded on `examples/original_source/annotated_string.h`'s `CharInfo`
//! and `LineBreak` structs.

use std::collections::BTreeSet;

use crate::id::Id;

/// A single character slot in the document, addressed by its identifier.
///
/// `after`/`before` are the creator's causal anchors, fixed at insertion
/// time and never changed afterwards. `prev`/`next` are the *current*
/// document-order neighbors across all cells, visible or not, and are
/// updated whenever a cell is linked into the chain.
#[derive(Clone, Debug)]
pub struct CharCell {
    /// `None` only for the `BEGIN`/`END` sentinels.
    pub chr: Option<char>,
    pub visible: bool,
    pub prev: Id,
    pub next: Id,
    pub after: Id,
    pub before: Id,
    pub annotations: BTreeSet<Id>,
}

impl CharCell {
    pub fn sentinel(prev: Id, next: Id) -> CharCell {
        CharCell {
            chr: None,
            visible: false,
            prev,
            next,
            after: prev,
            before: next,
            annotations: BTreeSet::new(),
        }
    }

    pub fn new(chr: char, after: Id, before: Id) -> CharCell {
        CharCell {
            chr: Some(chr),
            visible: true,
            prev: after,
            next: before,
            after,
            before,
            annotations: BTreeSet::new(),
        }
    }
}

/// An entry in the secondary line-break index: the newline-bearing cell's
/// neighboring newlines in document order. `BEGIN`/`END` participate as
/// anchors so every document has at least one line.
#[derive(Clone, Copy, Debug)]
pub struct LineBreak {
    pub prev: Id,
    pub next: Id,
}
