//! `annostring` implements the replicated core of a collaborative text
//! editor: a Logoot/WOOT-style character CRDT, an attribute/annotation
//! layer kept coherent with it, and a pure integration function so that
//! independent replicas converge on an identical document regardless of
//! delivery order across sites (FIFO-per-site delivery is required; see
//! [`error::Error::CausalityViolation`]).
//!
//! Everything outside this crate — rendering, cursor motion, selection,
//! file I/O, and transport between replicas — is the embedding
//! application's responsibility. This crate only ever consumes
//! [`command::CommandSet`] batches and produces [`snapshot::Snapshot`]s.
//!
//! A typical embedding holds one [`doc::Document`] per open file, feeds it
//! batches produced locally (via [`editor::AnnotationEditor`]) or received
//! over the network, and renders from [`doc::Document::snapshot`].

pub mod attr;
pub mod cell;
pub mod command;
pub mod doc;
pub mod editor;
pub mod error;
pub mod id;
pub mod iter;
pub mod pmap;
pub mod snapshot;
pub mod util;

pub use crate::command::{Command, CommandSet};
pub use crate::doc::Document;
pub use crate::editor::AnnotationEditor;
pub use crate::error::{Error, Result};
pub use crate::id::{Id, Site};
pub use crate::snapshot::Snapshot;
