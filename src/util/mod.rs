//! Utility types shared across the crate.

pub mod spinlock;

pub use spinlock::Spinlock;
