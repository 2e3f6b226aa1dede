//! Adaptive spin-then-yield backoff, used while waiting for the remainder
//! of a partially-read record to arrive on the wire.

use std::hint;
use std::thread;

/// Progressively increases wait time: spin with a CPU pause hint, then
/// yield to the OS scheduler, then give up. Mirrors the spin-to-yield
/// backoff idiom used by the buffer's producer-side wake path.
#[derive(Debug)]
pub struct Backoff {
    step: u32,
}

impl Backoff {
    const SPIN_LIMIT: u32 = 6;
    const YIELD_LIMIT: u32 = 10;

    #[must_use]
    pub fn new() -> Self {
        Self { step: 0 }
    }

    /// Spins or yields depending on how many times this has been called
    /// since the last [`Backoff::reset`].
    pub fn snooze(&mut self) {
        if self.step <= Self::SPIN_LIMIT {
            let spins = 1 << self.step;
            for _ in 0..spins {
                hint::spin_loop();
            }
        } else {
            thread::yield_now();
        }
        if self.step <= Self::YIELD_LIMIT {
            self.step += 1;
        }
    }

    /// Returns `true` once patience is exhausted and the caller should give
    /// up on the read rather than keep retrying.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.step > Self::YIELD_LIMIT
    }

    pub fn reset(&mut self) {
        self.step = 0;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}
