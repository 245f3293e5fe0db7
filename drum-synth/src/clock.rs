//! Millisecond time sources for the idle policy

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// Monotonic millisecond clock
///
/// Values wrap at `u32::MAX`; the engine only ever looks at differences.
pub trait Clock {
    fn milliseconds(&self) -> u32;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn milliseconds(&self) -> u32 {
        self.origin.elapsed().as_millis() as u32
    }
}

/// Externally driven clock
///
/// Clones share the same time, so a host can keep one handle and hand
/// another to the engine. Used for offline rendering, where time follows
/// the number of samples produced.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU32>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, milliseconds: u32) {
        self.now.store(milliseconds, Ordering::Relaxed);
    }

    pub fn advance(&self, milliseconds: u32) {
        self.now.fetch_add(milliseconds, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn milliseconds(&self) -> u32 {
        self.now.load(Ordering::Relaxed)
    }
}
