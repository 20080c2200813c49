//! Time sources.
//!
//! The ledger only ever reads the clock. Readings are seconds since the
//! UNIX epoch and must never decrease across calls.

#[cfg(any(test, feature = "test-helpers"))]
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use chrono::Utc;

/// A nondecreasing source of timestamps in seconds.
pub trait Clock {
    fn now(&self) -> u64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // Pre-epoch readings clamp to zero.
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Hand-driven clock for tests. Clones share the same reading.
///
/// Moving backwards is ignored so the nondecreasing contract holds.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl ManualClock {
    #[must_use]
    pub fn at(now: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(now)),
        }
    }

    /// Jump to `t`, unless that would move time backwards.
    pub fn set(&self, t: u64) {
        self.now.fetch_max(t, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
