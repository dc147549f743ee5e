//! Attribute/annotation layer (component D): interned declarations and
//! ranged annotations, bucketed by type so that "all tokens" or "all
//! diagnostics" iterates only its own bucket.
//!
//! Grounded on `examples/original_source/annotated_string.h`'s
//! `attributes_`/`attributes_by_type_`/`annotations_`/`annotations_by_type_`
//! fields and `ForEachAttribute`/`ForEachAnnotation` templates. The concrete
//! three-variant payload (tag set / diagnostic / side-buffer reference) is
//! inferred from the kinds of attribute a syntax-highlighting collaborator
//! attaches in `examples/original_source/regex_highlight_collaborator.cc`
//! (an out-of-scope file, consulted only to confirm the shape of a typical
//! attribute payload).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::Id;

/// Severity of a diagnostic attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// The payload of an attribute declaration. New variants can be added
/// without touching the character CRDT: the core only ever stores the
/// discriminant (see [`AttributeKind`]) alongside identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// A set of syntax-highlighting scope tags, e.g. `{"keyword", "control"}`.
    TagSet(BTreeSet<String>),
    /// A compiler/linter diagnostic.
    Diagnostic { severity: Severity, message: String },
    /// A reference to an auxiliary buffer (hover panel, definition preview).
    SideBuffer { name: String },
}

/// The type tag used to bucket both attribute declarations and annotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    TagSet,
    Diagnostic,
    SideBuffer,
}

impl Attribute {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::TagSet(_) => AttributeKind::TagSet,
            Attribute::Diagnostic { .. } => AttributeKind::Diagnostic,
            Attribute::SideBuffer { .. } => AttributeKind::SideBuffer,
        }
    }
}

/// A ranged attachment of an attribute declaration to `[begin, end]`
/// (inclusive, in document order) of the character CRDT.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub begin: Id,
    pub end: Id,
    pub attribute: Id,
    pub kind: AttributeKind,
}

pub const ALL_KINDS: [AttributeKind; 3] = [
    AttributeKind::TagSet,
    AttributeKind::Diagnostic,
    AttributeKind::SideBuffer,
];
