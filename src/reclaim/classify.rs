//! Eligibility classification.
//!
//! Two things are never force-freed: primitive-immediates, which have no
//! independent heap storage, and type descriptors, whose destruction would
//! invalidate category dispatch runtime-wide.

use crate::error::{FreeError, FreeResult};
use crate::heap::id::ObjectId;
use crate::object::{Category, Storage, Value};

/// Reject immediates, returning the heap identity otherwise.
pub(crate) fn require_heap_ref(value: Value) -> FreeResult<ObjectId> {
    match value {
        Value::Obj(id) => Ok(id),
        immediate => Err(FreeError::Immediate {
            kind: immediate.kind_name(),
        }),
    }
}

/// Reject critical objects, returning the teardown category otherwise.
pub(crate) fn ensure_eligible(storage: &Storage) -> FreeResult<Category> {
    match storage {
        Storage::Descriptor(descriptor) => Err(FreeError::CriticalObject {
            name: descriptor.name().to_string(),
        }),
        other => Ok(other.category()),
    }
}

/// Combined check used by `Heap::classify`.
pub(crate) fn eligible_category(storage: &Storage) -> FreeResult<Category> {
    ensure_eligible(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::descriptor::Descriptor;
    use crate::object::TextBuf;

    #[test]
    fn test_immediates_rejected_by_kind() {
        for (value, kind) in [
            (Value::Nil, "nil"),
            (Value::Bool(false), "boolean"),
            (Value::Int(10), "integer"),
        ] {
            match require_heap_ref(value) {
                Err(FreeError::Immediate { kind: got }) => assert_eq!(got, kind),
                other => panic!("expected immediate rejection, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_heap_ref_passes_through() {
        let id = ObjectId::dangling();
        assert_eq!(require_heap_ref(Value::Obj(id)).unwrap(), id);
    }

    #[test]
    fn test_descriptors_are_critical() {
        let storage = Storage::Descriptor(Descriptor::named("Widget"));
        match ensure_eligible(&storage) {
            Err(FreeError::CriticalObject { name }) => assert_eq!(name, "Widget"),
            other => panic!("expected critical rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_eligible_storage_yields_category() {
        let storage = Storage::Text(TextBuf::from_str("hi"));
        assert_eq!(ensure_eligible(&storage).unwrap(), Category::Text);
    }
}
