//! Editor-side helper for stable attribute/annotation identity (component F).
//!
//! Declaration interning deliberately lives here, not in the core: the CRDT
//! only needs propagated identifiers to agree across replicas, not that
//! they be content-addressed. A caller re-scanning a document (e.g. a
//! highlighter re-tokenizing after every keystroke) would otherwise emit a
//! fresh `Decl`/`Mark` for every attribute on every scan; this helper diffs
//! against the previous scan so only the delta becomes commands.
//!
//! Grounded on `examples/original_source/annotated_string.h`'s
//! `AnnotationEditor`/`ScopedEdit` class and its `last_attr2id_`/
//! `new_attr2id_`/`last_ann2id_`/`new_ann2id_` maps.

use std::collections::HashMap;

use crate::attr::{Attribute, AttributeKind};
use crate::command::{Command, CommandSet};
use crate::id::{Id, Site};

/// Uniquely identifies an annotation's position and payload for diffing
/// across successive `end_edit` calls, independent of the identifier
/// assigned to it.
#[derive(Clone, PartialEq, Eq, Hash)]
struct MarkKey {
    begin: Id,
    end: Id,
    attribute: Id,
}

pub struct AnnotationEditor {
    site: Site,
    last_attr2id: HashMap<Attribute, Id>,
    new_attr2id: HashMap<Attribute, Id>,
    last_ann2id: HashMap<MarkKey, Id>,
    new_ann2id: HashMap<MarkKey, Id>,
    pending: CommandSet,
}

impl AnnotationEditor {
    pub fn new(site: Site) -> AnnotationEditor {
        AnnotationEditor {
            site,
            last_attr2id: HashMap::new(),
            new_attr2id: HashMap::new(),
            last_ann2id: HashMap::new(),
            new_ann2id: HashMap::new(),
            pending: CommandSet::new(),
        }
    }

    /// Returns the identifier for `attribute`, reusing one from the
    /// current or previous batch if the payload is unchanged, otherwise
    /// emitting a fresh `Decl`.
    pub fn attr_id(&mut self, attribute: Attribute) -> Id {
        if let Some(id) = self.new_attr2id.get(&attribute) {
            return *id;
        }
        if let Some(id) = self.last_attr2id.get(&attribute) {
            self.new_attr2id.insert(attribute, *id);
            return *id;
        }
        let id = self.site.generate();
        self.pending.push(Command::Decl { id, attribute: attribute.clone() });
        self.new_attr2id.insert(attribute, id);
        id
    }

    /// Returns the identifier for a `Mark` over `[begin, end]` referencing
    /// `attribute`, reusing one from the current or previous batch if the
    /// range and attribute are unchanged, otherwise emitting a fresh
    /// `Mark`.
    pub fn mark(&mut self, begin: Id, end: Id, attribute: Id, kind: AttributeKind) -> Id {
        let key = MarkKey { begin, end, attribute };
        if let Some(id) = self.new_ann2id.get(&key) {
            return *id;
        }
        if let Some(id) = self.last_ann2id.get(&key) {
            self.new_ann2id.insert(key, *id);
            return *id;
        }
        let id = self.site.generate();
        self.pending.push(Command::Mark { id, begin, end, attribute, kind });
        self.new_ann2id.insert(key, id);
        id
    }

    /// Allocates a contiguous clock block and emits one `Insert` per
    /// character of `text`, chaining them together between `after` and
    /// `before`, returning the id of the last inserted character. Mirrors
    /// the original `MakeInsert`/`MakeRawInsert` helper pair, which derives
    /// `before` itself from `after`'s current successor — this helper holds
    /// no snapshot (only attribute/annotation identity across edits), so it
    /// cannot look that up and the caller must pass `before` explicitly,
    /// typically `snapshot.cell(after).unwrap().next`.
    pub fn make_insert(&mut self, text: &str, after: Id, before: Id) -> Id {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return after;
        }
        let (first, _last_exclusive) = self.site.generate_block(chars.len() as u64);
        let mut prev_anchor = after;
        for (i, chr) in chars.iter().enumerate() {
            let this_id = Id::pack(self.site.id(), first.clock() + i as u64);
            self.pending.push(Command::Insert { id: this_id, after: prev_anchor, before, chr: *chr });
            prev_anchor = this_id;
        }
        prev_anchor
    }

    /// Rotates the current batch into "previous", starts a fresh current
    /// batch, and emits `DelDecl`/`DelMark` for anything that was present
    /// in the previous batch but not carried into the current one.
    /// Returns the commands accumulated since the last `end_edit`.
    pub fn end_edit(&mut self) -> CommandSet {
        for (attribute, id) in self.last_attr2id.iter() {
            if !self.new_attr2id.contains_key(attribute) {
                self.pending.push(Command::DelDecl { id: *id });
            }
        }
        for (key, id) in self.last_ann2id.iter() {
            if !self.new_ann2id.contains_key(key) {
                self.pending.push(Command::DelMark { id: *id });
            }
        }

        tracing::debug!(
            reused_attrs = self.new_attr2id.len(),
            reused_marks = self.new_ann2id.len(),
            "end_edit"
        );

        self.last_attr2id = std::mem::take(&mut self.new_attr2id);
        self.last_ann2id = std::mem::take(&mut self.new_ann2id);

        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;
