//! Request generations for discarding stale responses.
//!
//! Every fetch takes a [`Ticket`] when it starts. Starting another fetch
//! bumps the generation, so a slow response for an older query can tell it
//! has been superseded and be dropped instead of overwriting newer results.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Proof of which generation a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Shared generation counter. Clones observe the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// The newest ticket handed out so far
    pub fn current(&self) -> Ticket {
        Ticket(self.current.load(Ordering::Acquire))
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current() == ticket
    }
}
