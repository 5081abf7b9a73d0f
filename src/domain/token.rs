//! Latest-wins request tokens.
//!
//! A component takes a token before every fetch and applies the response
//! only if no newer token was issued in the meantime. Late responses from
//! superseded requests are dropped instead of overwriting fresher content.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of one issued request. Higher is newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw sequence number, for logging.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Monotonic token source for a single component.
#[derive(Debug, Default)]
pub struct RequestGate {
    latest: AtomicU64,
}

impl RequestGate {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Issue a token newer than every token issued before.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// True when `token` is the most recently issued one.
    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::Acquire) == token.0
    }
}
