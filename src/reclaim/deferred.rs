//! Deferred release queue for foreign resources.
//!
//! A foreign object's release callback may tear down state the embedder
//! wants handled at a controlled point (file handles, FFI allocations),
//! so freeing such an object queues the callback instead of running it
//! inline. The slot is poisoned immediately either way; deferral affects
//! only the external release.

use crossbeam_queue::SegQueue;

use crate::object::foreign::{ForeignData, ReleaseFn};

/// A queued foreign release.
pub(crate) struct DeferredRelease {
    data: ForeignData,
    release: ReleaseFn,
}

impl DeferredRelease {
    pub fn new(data: ForeignData, release: ReleaseFn) -> Self {
        Self { data, release }
    }

    fn run(self) {
        (self.release)(self.data);
    }
}

/// Lock-free queue of pending foreign releases.
pub(crate) struct DeferredQueue {
    queue: SegQueue<DeferredRelease>,
}

impl DeferredQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            queue: SegQueue::new(),
        }
    }

    /// Queue a release.
    pub fn push(&self, release: DeferredRelease) {
        self.queue.push(release);
    }

    /// Run every queued release on the calling thread. Returns the number
    /// processed.
    pub fn drain(&self) -> usize {
        let mut processed = 0;
        while let Some(pending) = self.queue.pop() {
            pending.run();
            processed += 1;
        }
        processed
    }

    /// Whether any releases are pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Approximate number of pending releases.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
