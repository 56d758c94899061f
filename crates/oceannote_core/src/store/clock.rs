//! Time source and mutation stamping for the note store.
//!
//! # Invariants
//! - Stamps issued by one [`Stamper`] are strictly increasing.
//! - A stamp is never earlier than any timestamp already held by the store.

use crate::model::note::EpochMillis;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock source in epoch milliseconds.
///
/// `Send + Sync` so stores can be shared across request threads.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> EpochMillis;
}

/// [`Clock`] backed by `SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> EpochMillis {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Issues monotonic mutation stamps from a [`Clock`].
pub(crate) struct Stamper {
    clock: Box<dyn Clock>,
    last: EpochMillis,
}

impl Stamper {
    pub(crate) fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            last: EpochMillis::MIN,
        }
    }

    /// Current clock reading without issuing a stamp.
    pub(crate) fn now(&self) -> EpochMillis {
        self.clock.now_ms()
    }

    /// Returns `max(now, last + 1)` and records it.
    pub(crate) fn next(&mut self) -> EpochMillis {
        let now = self.clock.now_ms();
        let stamp = now.max(self.last.saturating_add(1));
        self.last = stamp;
        stamp
    }

    /// Records an externally produced timestamp so later stamps stay ahead of it.
    pub(crate) fn observe(&mut self, stamp: EpochMillis) {
        if stamp > self.last {
            self.last = stamp;
        }
    }
}
