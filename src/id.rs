//! Identifier service (component B): globally unique, totally ordered
//! `(site, clock)` identifiers.
//!
//! Packs a 16-bit site and a 48-bit clock into a single `u64` so that the
//! natural unsigned order on the packed value is exactly `(site, clock)`
//! lexicographic order, which is what the character CRDT's tie-break rule
//! (see `crate::command`) relies on.

use std::fmt;
use std::sync::atomic::{AtomicU16, AtomicU64, Ordering::SeqCst};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

const CLOCK_BITS: u32 = 48;
const CLOCK_MASK: u64 = (1u64 << CLOCK_BITS) - 1;

/// A packed `(site, clock)` identifier. Ordered as an unsigned 64-bit value,
/// which sorts by `site` first and `clock` second.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Id(u64);

impl Id {
    /// Reserved identifier marking the start of every document.
    pub const BEGIN: Id = Id::pack(0, 1);
    /// Reserved identifier marking the end of every document.
    pub const END: Id = Id::pack(0, 2);

    #[inline]
    pub const fn pack(site: u16, clock: u64) -> Id {
        Id(((site as u64) << CLOCK_BITS) | (clock & CLOCK_MASK))
    }

    #[inline]
    pub fn site(&self) -> u16 {
        (self.0 >> CLOCK_BITS) as u16
    }

    #[inline]
    pub fn clock(&self) -> u64 {
        self.0 & CLOCK_MASK
    }

    /// True for `site == 0`, which is reserved for `BEGIN`/`END` and must
    /// never be produced by a generator.
    #[inline]
    pub fn is_sentinel_site(&self) -> bool {
        self.site() == 0
    }

    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    #[inline]
    pub fn from_u64(v: u64) -> Id {
        Id(v)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Id::BEGIN {
            write!(f, "Id(BEGIN)")
        } else if *self == Id::END {
            write!(f, "Id(END)")
        } else {
            write!(f, "Id({}:{})", self.site(), self.clock())
        }
    }
}

static PROCESS_SITE_ALLOCATOR: AtomicU16 = AtomicU16::new(1);

/// A replica's identity: a site number plus a monotonic per-site clock.
///
/// `Site` is cheap to `Clone` — the counter is an `Arc<AtomicU64>` — so the
/// same logical site can be shared across threads producing commands
/// concurrently for one replica without any additional locking: the
/// identifier space is a single atomic counter.
#[derive(Clone)]
pub struct Site {
    site: u16,
    clock: Arc<AtomicU64>,
}

impl Site {
    /// Construct a site with an explicit, caller-assigned id. This is the
    /// primary, production path: the embedding application owns replica
    /// identity assignment (e.g. from a session handshake) and must ensure
    /// site numbers are globally unique across the collaboration.
    pub fn new(site: u16) -> Site {
        assert!(site != 0, "site 0 is reserved for sentinels");
        Site {
            site,
            clock: Arc::new(AtomicU64::new(3)), // 1, 2 reserved for BEGIN/END
        }
    }

    /// Compatibility/testing path: assigns the next site id from a
    /// process-wide atomic counter. Never used implicitly by the core;
    /// intended for tests and examples that have not wired up their own
    /// site-identity assignment.
    pub fn from_process_allocator() -> Site {
        let site = PROCESS_SITE_ALLOCATOR.fetch_add(1, SeqCst);
        Site::new(site)
    }

    #[inline]
    pub fn id(&self) -> u16 {
        self.site
    }

    /// Allocate the next identifier for this site.
    pub fn generate(&self) -> Id {
        let clock = self.clock.fetch_add(1, SeqCst);
        Id::pack(self.site, clock)
    }

    /// Allocate a contiguous block of `n` identifiers in one atomic step,
    /// returning `(first, last_exclusive)`. Used by bulk text inserts so
    /// that a whole inserted run has contiguous clocks in creator order.
    pub fn generate_block(&self, n: u64) -> (Id, Id) {
        let first = self.clock.fetch_add(n, SeqCst);
        (Id::pack(self.site, first), Id::pack(self.site, first + n))
    }
}

#[cfg(test)]
#[path = "id_test.rs"]
mod id_test;
