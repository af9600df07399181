//! Category teardown dispatch.
//!
//! Consumes an object's storage and releases every heap buffer it owns.
//! Infallible: eligibility was confirmed upstream, and releasing an
//! already-empty buffer is a no-op.

use crate::object::Storage;
use crate::reclaim::deferred::{DeferredQueue, DeferredRelease};

/// Release the storage, returning the number of backing bytes freed.
///
/// Foreign objects with an external release callback are handed to the
/// deferred queue; everything else is released inline.
pub(crate) fn release(storage: Storage, poison_fill: bool, deferred: &DeferredQueue) -> usize {
    match storage {
        Storage::Text(mut buf) => buf.release(poison_fill),
        Storage::Sequence(mut buf) => buf.release(poison_fill),
        Storage::Table(mut table) => table.release(),
        Storage::Pattern(mut pattern) => pattern.release(poison_fill),
        Storage::Record(mut record) => record.release(),
        // Boxed floats carry no separately-allocated backing.
        Storage::Float(_) => 0,
        Storage::BigInt(mut digits) => digits.release(poison_fill),
        Storage::Foreign(mut foreign) => {
            match foreign.take_parts() {
                (Some(data), Some(release)) => {
                    deferred.push(DeferredRelease::new(data, release));
                }
                (Some(data), None) => drop(data),
                _ => {}
            }
            0
        }
        // Critical objects never reach teardown; eligibility rejected them.
        Storage::Descriptor(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ForeignBuf, SeqBuf, TextBuf, Value};

    #[test]
    fn test_text_teardown_reports_bytes() {
        let queue = DeferredQueue::new();
        let freed = release(
            Storage::Text(TextBuf::from_str("hello")),
            false,
            &queue,
        );
        assert_eq!(freed, 5);
    }

    #[test]
    fn test_sequence_teardown_reports_bytes() {
        let queue = DeferredQueue::new();
        let storage = Storage::Sequence(SeqBuf::from_slice(&[Value::Int(1), Value::Int(2)]));
        let freed = release(storage, false, &queue);
        assert_eq!(freed, 2 * std::mem::size_of::<Value>());
    }

    #[test]
    fn test_float_teardown_is_noop() {
        let queue = DeferredQueue::new();
        assert_eq!(release(Storage::Float(2.5), false, &queue), 0);
    }

    #[test]
    fn test_foreign_with_callback_is_deferred() {
        let queue = DeferredQueue::new();
        let storage = Storage::Foreign(ForeignBuf::with_release(
            Box::new(1u8),
            Box::new(|_| {}),
        ));

        release(storage, false, &queue);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_foreign_without_callback_drops_inline() {
        let queue = DeferredQueue::new();
        let storage = Storage::Foreign(ForeignBuf::new(Box::new(1u8)));

        release(storage, false, &queue);
        assert!(queue.is_empty());
    }
}
