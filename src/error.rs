//! Error taxonomy for the annotated-string core.
//!
//! Every fallible entry point returns [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`. The core never panics on malformed or
//! out-of-order input; it rejects the whole batch and leaves the caller's
//! snapshot untouched.

use thiserror::Error as ThisError;

use crate::id::Id;

/// Closed error enum covering every way a batch can be rejected.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An `Insert` or `Mark` referenced an anchor/endpoint that is not yet
    /// present in the snapshot. Requires FIFO-per-site delivery; a caller
    /// that sees this has delivered commands out of causal order.
    #[error("causality violation: command referenced unknown id {0:?}")]
    CausalityViolation(Id),

    /// An `Insert` attempted to create or overwrite a reserved sentinel
    /// (`BEGIN`/`END`), or used `site = 0`.
    #[error("sentinel violation: {0:?} is reserved")]
    SentinelViolation(Id),

    /// A command batch could not be decoded off the wire.
    #[error("malformed command: {0}")]
    Decode(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
