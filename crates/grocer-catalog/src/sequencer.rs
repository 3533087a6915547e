//! # Request Sequencer
//!
//! Closes the "last response wins" race between overlapping catalog calls.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Out-of-order Responses                                │
//! │                                                                         │
//! │  t0  issue #1  fetch-all ───────────────────────────────┐               │
//! │  t1  issue #2  search "milk" ─────────┐                 │               │
//! │  t2                                   ▼ #2 is latest → apply            │
//! │  t3                                                     ▼ #1 < #2 → drop│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tickets are strictly increasing. A response may be applied only while its
//! ticket is still the latest one issued.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number attached to one outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing [`RequestTicket`]s.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the next ticket. The first ticket is 1.
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Most recently issued ticket, if any.
    pub fn latest(&self) -> Option<RequestTicket> {
        match self.issued.load(Ordering::SeqCst) {
            0 => None,
            n => Some(RequestTicket(n)),
        }
    }

    /// True when no newer request has been issued since `ticket`.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.latest() == Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tickets_increase() {
        let seq = RequestSequencer::new();
        assert_eq!(seq.latest(), None);
        let a = seq.issue();
        let b = seq.issue();
        assert!(b > a);
        assert_eq!(a.value(), 1);
        assert_eq!(b.value(), 2);
    }

    #[test]
    fn test_only_latest_is_current() {
        let seq = RequestSequencer::new();
        let old = seq.issue();
        assert!(seq.is_latest(old));
        let new = seq.issue();
        assert!(!seq.is_latest(old));
        assert!(seq.is_latest(new));
    }
}
