//! Command vocabulary and wire format (component F / external interfaces).
//!
//! Grounded on `examples/original_source/annotated_string.h`'s
//! `MakeRawInsert`/`MakeInsert`/`MakeDelete`/`MakeDecl`/`MakeMark`/
//! `MakeDelDecl`/`MakeDelMark` command constructors. Encoding uses `serde`
//! derive; `bincode` is exercised in tests as one concrete binary format,
//! but the core itself is format-agnostic — any `serde` format works.

use serde::{Deserialize, Serialize};

use crate::attr::{Attribute, AttributeKind};
use crate::error::{Error, Result};
use crate::id::Id;

/// A single replicated operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Insert `chr` as a new cell `id`, anchored between `after` and
    /// `before` as observed by the creator.
    Insert {
        id: Id,
        after: Id,
        before: Id,
        chr: char,
    },
    /// Mark cell `id` not visible.
    DelChar { id: Id },
    /// Record an attribute declaration under identifier `id`.
    Decl { id: Id, attribute: Attribute },
    /// Retract attribute declaration `id`.
    DelDecl { id: Id },
    /// Attach an annotation `id` covering `[begin, end]` to `attribute`.
    Mark {
        id: Id,
        begin: Id,
        end: Id,
        attribute: Id,
        kind: AttributeKind,
    },
    /// Remove annotation `id`.
    DelMark { id: Id },
}

/// An ordered batch of commands, applied atomically by
/// [`crate::snapshot::integrate`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSet {
    pub commands: Vec<Command>,
}

impl CommandSet {
    pub fn new() -> CommandSet {
        CommandSet::default()
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Encode this batch using `bincode`, the crate's reference wire
    /// format.
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|err| Error::Decode(err.to_string()))
    }

    /// Decode a batch previously produced by [`CommandSet::encode`].
    /// Malformed input is rejected here, at the deserialization boundary,
    /// before it ever reaches `integrate`.
    pub fn decode(bytes: &[u8]) -> Result<CommandSet> {
        bincode::deserialize(bytes).map_err(|err| Error::Decode(err.to_string()))
    }
}

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;
