//! Bounded-parallelism gate for outgoing API requests.
//!
//! The Syncthing GUI endpoint is a single local process; a folder-sharing
//! topology can produce tens to hundreds of completion queries per run,
//! and issuing them all at once would saturate it. The capacity is a
//! fixed constant, not configuration.

use tokio::sync::{Semaphore, SemaphorePermit};

/// Maximum number of in-flight API requests per run.
pub const MAX_IN_FLIGHT: usize = 5;

/// Counting gate of fixed capacity [`MAX_IN_FLIGHT`].
///
/// `acquire` suspends until a slot frees; the returned permit releases
/// its slot on drop, so every exit path (success or error) gives the
/// slot back. One instance bounds every fan-out of a run.
#[derive(Debug)]
pub struct Limiter {
    slots: Semaphore,
}

impl Limiter {
    pub fn new() -> Self {
        Self {
            slots: Semaphore::new(MAX_IN_FLIGHT),
        }
    }

    /// Wait for a free slot. Holds the slot for the permit's lifetime.
    pub async fn acquire(&self) -> SemaphorePermit<'_> {
        // The semaphore is never closed, so acquire cannot fail.
        self.slots
            .acquire()
            .await
            .expect("limiter semaphore closed")
    }
}

impl Default for Limiter {
    fn default() -> Self {
        Self::new()
    }
}
