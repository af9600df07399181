//! Foreign backing storage: externally-owned data with a release callback.
//!
//! A foreign object wraps a payload the engine does not understand. If a
//! release callback is attached, teardown hands both to the deferred
//! release queue instead of running the callback inline; external teardown
//! then happens at a point the embedder chooses (`Heap::drain_deferred`).

use std::any::Any;

/// Opaque foreign payload.
pub type ForeignData = Box<dyn Any + Send>;

/// Release callback invoked with the payload when the object is reclaimed.
pub type ReleaseFn = Box<dyn FnOnce(ForeignData) + Send>;

/// Foreign resource storage.
pub struct ForeignBuf {
    data: Option<ForeignData>,
    release: Option<ReleaseFn>,
}

impl ForeignBuf {
    /// Wrap a payload with no release callback; the payload simply drops
    /// on teardown.
    pub fn new(data: ForeignData) -> Self {
        Self {
            data: Some(data),
            release: None,
        }
    }

    /// Wrap a payload with a release callback.
    pub fn with_release(data: ForeignData, release: ReleaseFn) -> Self {
        Self {
            data: Some(data),
            release: Some(release),
        }
    }

    /// Whether a release callback is attached.
    pub fn has_release(&self) -> bool {
        self.release.is_some()
    }

    /// Borrow the payload downcast to `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.as_ref().and_then(|d| d.downcast_ref::<T>())
    }

    /// Take the payload and callback out for teardown.
    pub(crate) fn take_parts(&mut self) -> (Option<ForeignData>, Option<ReleaseFn>) {
        (self.data.take(), self.release.take())
    }
}

impl Drop for ForeignBuf {
    fn drop(&mut self) {
        // Dropped without going through the free pipeline (e.g. the heap
        // itself is dropped): honor the release callback inline.
        if let (Some(data), Some(release)) = (self.data.take(), self.release.take()) {
            release(data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_downcast() {
        let buf = ForeignBuf::new(Box::new(42u32));
        assert_eq!(buf.downcast_ref::<u32>(), Some(&42));
        assert_eq!(buf.downcast_ref::<String>(), None);
    }

    #[test]
    fn test_drop_runs_release() {
        let released = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&released);

        let buf = ForeignBuf::with_release(
            Box::new(7u8),
            Box::new(move |_| flag.store(true, Ordering::Relaxed)),
        );
        drop(buf);

        assert!(released.load(Ordering::Relaxed));
    }

    #[test]
    fn test_take_parts_disarms_drop() {
        let released = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&released);

        let mut buf = ForeignBuf::with_release(
            Box::new(7u8),
            Box::new(move |_| flag.store(true, Ordering::Relaxed)),
        );
        let (data, release) = buf.take_parts();
        drop(buf);

        assert!(!released.load(Ordering::Relaxed));
        release.unwrap()(data.unwrap());
        assert!(released.load(Ordering::Relaxed));
    }
}
