//! The annotated replicated string itself: an immutable `Snapshot` plus the
//! pure `integrate` entry point that turns a snapshot and a command batch
//! into a new snapshot (component G), built on top of the character CRDT
//! (component C), attribute/annotation layer (component D) and line index
//! (component E).
//!
//! Grounded on `examples/original_source/annotated_string.h`'s
//! `AnnotatedString` class: its private `Integrate*` dispatch methods,
//! `Render`, `ForEachAnnotation`/`ForEachAttribute`, and
//! `SameContentIdentity`/`SameTotalIdentity`.

use crate::attr::{Annotation, Attribute, AttributeKind};
use crate::cell::{CharCell, LineBreak};
use crate::command::{Command, CommandSet};
use crate::error::{Error, Result};
use crate::id::Id;
use crate::pmap::Map;

/// An immutable state of the document. Every [`Snapshot::integrate`] call
/// returns a new `Snapshot`; unmodified substructure is shared with the
/// original via the persistent maps underneath.
#[derive(Clone)]
pub struct Snapshot {
    chars: Map<Id, CharCell>,
    line_breaks: Map<Id, LineBreak>,
    attributes: Map<Id, Attribute>,
    attributes_by_type: Map<AttributeKind, Map<Id, ()>>,
    annotations: Map<Id, Annotation>,
    annotations_by_type: Map<AttributeKind, Map<Id, ()>>,
}

impl Default for Snapshot {
    fn default() -> Snapshot {
        Snapshot::new()
    }
}

impl Snapshot {
    /// A fresh document containing only the `BEGIN`/`END` sentinels.
    pub fn new() -> Snapshot {
        let chars = Map::new()
            .insert(Id::BEGIN, CharCell::sentinel(Id::BEGIN, Id::END))
            .insert(Id::END, CharCell::sentinel(Id::BEGIN, Id::END));
        let line_breaks = Map::new()
            .insert(Id::BEGIN, LineBreak { prev: Id::BEGIN, next: Id::END })
            .insert(Id::END, LineBreak { prev: Id::BEGIN, next: Id::END });
        Snapshot {
            chars,
            line_breaks,
            attributes: Map::new(),
            attributes_by_type: Map::new(),
            annotations: Map::new(),
            annotations_by_type: Map::new(),
        }
    }

    /// Apply `batch` to `self`, returning a new snapshot. `self` is
    /// unaffected, including on error: a rejected batch leaves the caller
    /// with exactly the snapshot it started with.
    pub fn integrate(&self, batch: &CommandSet) -> Result<Snapshot> {
        let span = tracing::span!(tracing::Level::TRACE, "integrate", len = batch.len());
        let _enter = span.enter();

        let mut working = self.clone();
        let (mut inserted, mut deleted, mut marked) = (0usize, 0usize, 0usize);

        for command in &batch.commands {
            let result = match command {
                Command::Insert { id, after, before, chr } => {
                    tracing::trace!(?id, "insert");
                    let r = working.integrate_insert(*id, *after, *before, *chr);
                    if r.is_ok() {
                        inserted += 1;
                    }
                    r
                }
                Command::DelChar { id } => {
                    tracing::trace!(?id, "delchar");
                    deleted += 1;
                    working.integrate_delchar(*id);
                    Ok(())
                }
                Command::Decl { id, attribute } => {
                    tracing::trace!(?id, "decl");
                    working.integrate_decl(*id, attribute.clone());
                    Ok(())
                }
                Command::DelDecl { id } => {
                    tracing::trace!(?id, "deldecl");
                    working.integrate_deldecl(*id);
                    Ok(())
                }
                Command::Mark { id, begin, end, attribute, kind } => {
                    tracing::trace!(?id, "mark");
                    let r = working.integrate_mark(*id, *begin, *end, *attribute, *kind);
                    if r.is_ok() {
                        marked += 1;
                    }
                    r
                }
                Command::DelMark { id } => {
                    tracing::trace!(?id, "delmark");
                    working.integrate_delmark(*id)
                }
            };

            if let Err(err) = result {
                tracing::warn!(?err, "batch rejected");
                return Err(err);
            }
        }

        tracing::debug!(inserted, deleted, marked, "batch integrated");
        Ok(working)
    }

    fn integrate_insert(&mut self, id: Id, after: Id, before: Id, chr: char) -> Result<()> {
        if id.is_sentinel_site() || id == Id::BEGIN || id == Id::END {
            return Err(Error::SentinelViolation(id));
        }
        if self.chars.contains_key(&id) {
            return Ok(()); // duplicate insert, idempotent no-op
        }
        if !self.chars.contains_key(&after) {
            return Err(Error::CausalityViolation(after));
        }
        if !self.chars.contains_key(&before) {
            return Err(Error::CausalityViolation(before));
        }

        let mut prev = after;
        let mut cur = self.chars.get(&after).unwrap().next;
        while cur != before {
            if cur > id {
                break;
            }
            prev = cur;
            cur = self.chars.get(&cur).unwrap().next;
        }

        let cell = CharCell { prev, next: cur, ..CharCell::new(chr, after, before) };
        self.chars = self.chars.insert(id, cell);

        let mut prev_cell = self.chars.get(&prev).unwrap().clone();
        prev_cell.next = id;
        self.chars = self.chars.insert(prev, prev_cell);

        let mut cur_cell = self.chars.get(&cur).unwrap().clone();
        cur_cell.prev = id;
        self.chars = self.chars.insert(cur, cur_cell);

        if chr == '\n' {
            self.add_line_break(id);
        }
        Ok(())
    }

    fn integrate_delchar(&mut self, id: Id) {
        if id == Id::BEGIN || id == Id::END {
            return;
        }
        if let Some(cell) = self.chars.get(&id) {
            if cell.visible {
                let mut cell = cell.clone();
                cell.visible = false;
                let chr = cell.chr;
                self.chars = self.chars.insert(id, cell);
                if chr == Some('\n') {
                    self.remove_line_break(id);
                }
            }
        }
    }

    fn add_line_break(&mut self, id: Id) {
        let mut p = self.chars.get(&id).unwrap().prev;
        while !self.line_breaks.contains_key(&p) {
            p = self.chars.get(&p).unwrap().prev;
        }
        let next = self.line_breaks.get(&p).unwrap().next;

        self.line_breaks = self.line_breaks.insert(id, LineBreak { prev: p, next });

        let mut p_entry = self.line_breaks.get(&p).unwrap().clone();
        p_entry.next = id;
        self.line_breaks = self.line_breaks.insert(p, p_entry);

        let mut n_entry = self.line_breaks.get(&next).unwrap().clone();
        n_entry.prev = id;
        self.line_breaks = self.line_breaks.insert(next, n_entry);
    }

    fn remove_line_break(&mut self, id: Id) {
        let entry = match self.line_breaks.get(&id) {
            Some(e) => *e,
            None => return,
        };
        let mut p_entry = self.line_breaks.get(&entry.prev).unwrap().clone();
        p_entry.next = entry.next;
        self.line_breaks = self.line_breaks.insert(entry.prev, p_entry);

        let mut n_entry = self.line_breaks.get(&entry.next).unwrap().clone();
        n_entry.prev = entry.prev;
        self.line_breaks = self.line_breaks.insert(entry.next, n_entry);

        self.line_breaks = self.line_breaks.remove(&id);
    }

    fn integrate_decl(&mut self, id: Id, attribute: Attribute) {
        let kind = attribute.kind();
        self.attributes = self.attributes.insert(id, attribute);
        let bucket = self.attributes_by_type.get(&kind).cloned().unwrap_or_default();
        let bucket = bucket.insert(id, ());
        self.attributes_by_type = self.attributes_by_type.insert(kind, bucket);
    }

    fn integrate_deldecl(&mut self, id: Id) {
        if let Some(attr) = self.attributes.get(&id).cloned() {
            let kind = attr.kind();
            self.attributes = self.attributes.remove(&id);
            if let Some(bucket) = self.attributes_by_type.get(&kind).cloned() {
                self.attributes_by_type = self.attributes_by_type.insert(kind, bucket.remove(&id));
            }
        }
    }

    /// Document-order cell ids in the closed range `[begin, end]`.
    fn cells_in_range(&self, begin: Id, end: Id) -> Result<Vec<Id>> {
        if !self.chars.contains_key(&begin) {
            return Err(Error::CausalityViolation(begin));
        }
        if !self.chars.contains_key(&end) {
            return Err(Error::CausalityViolation(end));
        }
        let mut ids = Vec::new();
        let mut cur = begin;
        loop {
            ids.push(cur);
            if cur == end {
                break;
            }
            if cur == Id::END {
                return Err(Error::CausalityViolation(end));
            }
            cur = self.chars.get(&cur).unwrap().next;
        }
        Ok(ids)
    }

    fn integrate_mark(
        &mut self,
        id: Id,
        begin: Id,
        end: Id,
        attribute: Id,
        kind: AttributeKind,
    ) -> Result<()> {
        let ids = self.cells_in_range(begin, end)?;

        self.annotations = self.annotations.insert(id, Annotation { begin, end, attribute, kind });
        let bucket = self.annotations_by_type.get(&kind).cloned().unwrap_or_default();
        self.annotations_by_type = self.annotations_by_type.insert(kind, bucket.insert(id, ()));

        for cid in ids {
            let mut cell = self.chars.get(&cid).unwrap().clone();
            cell.annotations.insert(id);
            self.chars = self.chars.insert(cid, cell);
        }
        Ok(())
    }

    fn integrate_delmark(&mut self, id: Id) -> Result<()> {
        let annotation = match self.annotations.get(&id).cloned() {
            Some(a) => a,
            None => return Ok(()), // unknown id, idempotent no-op
        };

        let ids = self.cells_in_range(annotation.begin, annotation.end)?;
        for cid in ids {
            if let Some(mut cell) = self.chars.get(&cid).cloned() {
                cell.annotations.remove(&id);
                self.chars = self.chars.insert(cid, cell);
            }
        }

        self.annotations = self.annotations.remove(&id);
        if let Some(bucket) = self.annotations_by_type.get(&annotation.kind).cloned() {
            self.annotations_by_type =
                self.annotations_by_type.insert(annotation.kind, bucket.remove(&id));
        }
        Ok(())
    }

    /// Expands a closed, document-order range delete into one `DelChar`
    /// per covered cell. Convention: `[beg, end]` inclusive of both
    /// endpoints (see DESIGN.md Open Question (d)).
    pub fn make_delete(&self, beg: Id, end: Id) -> Result<Vec<Command>> {
        let ids = self.cells_in_range(beg, end)?;
        Ok(ids.into_iter().map(|id| Command::DelChar { id }).collect())
    }

    /// Concatenation of visible characters in document order.
    pub fn render(&self) -> String {
        self.render_range(Id::BEGIN, Id::END)
    }

    /// Concatenation of visible characters in `[begin, end]`, document
    /// order.
    pub fn render_range(&self, begin: Id, end: Id) -> String {
        let mut out = String::new();
        let mut cur = begin;
        loop {
            if let Some(cell) = self.chars.get(&cur) {
                if cell.visible {
                    if let Some(c) = cell.chr {
                        out.push(c);
                    }
                }
                if cur == end {
                    break;
                }
                cur = cell.next;
            } else {
                break;
            }
        }
        out
    }

    pub fn for_each_attribute<F>(&self, kind: AttributeKind, mut f: F)
    where
        F: FnMut(Id, &Attribute),
    {
        if let Some(bucket) = self.attributes_by_type.get(&kind) {
            for (id, _) in bucket.iter() {
                if let Some(attr) = self.attributes.get(id) {
                    f(*id, attr);
                }
            }
        }
    }

    /// Visits every annotation of `kind`, resolving its attribute
    /// declaration to the payload the caller actually needs to render
    /// (a tag set, a diagnostic, a side-buffer reference). An annotation
    /// whose declaration has been retracted is skipped, mirroring the
    /// original `ForEachAnnotation`'s `am->Lookup` early return.
    pub fn for_each_annotation<F>(&self, kind: AttributeKind, mut f: F)
    where
        F: FnMut(Id, Id, Id, &Attribute),
    {
        if let Some(bucket) = self.annotations_by_type.get(&kind) {
            for (id, _) in bucket.iter() {
                if let Some(ann) = self.annotations.get(id) {
                    if let Some(attribute) = self.attributes.get(&ann.attribute) {
                        f(*id, ann.begin, ann.end, attribute);
                    }
                }
            }
        }
    }

    pub fn cell(&self, id: Id) -> Option<&CharCell> {
        self.chars.get(&id)
    }

    pub fn annotation(&self, id: Id) -> Option<&Annotation> {
        self.annotations.get(&id)
    }

    pub fn attribute(&self, id: Id) -> Option<&Attribute> {
        self.attributes.get(&id)
    }

    pub fn line_break(&self, id: Id) -> Option<&LineBreak> {
        self.line_breaks.get(&id)
    }

    /// O(1) identity check on the character map alone.
    pub fn same_content_identity(&self, other: &Snapshot) -> bool {
        self.chars.same_identity(&other.chars)
    }

    /// O(1) identity check on characters plus attribute and annotation
    /// buckets.
    pub fn same_total_identity(&self, other: &Snapshot) -> bool {
        self.chars.same_identity(&other.chars)
            && self.attributes_by_type.same_identity(&other.attributes_by_type)
            && self.annotations_by_type.same_identity(&other.annotations_by_type)
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;
