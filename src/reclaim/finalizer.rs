//! Finalizer invocation.

use crate::error::{FreeError, FreeResult};
use crate::heap::Object;
use crate::object::Value;

/// Invoke the object's finalizer hook, if one is attached.
///
/// The hook sees the object's pre-free storage. On failure the error is
/// propagated unchanged and the hook stays registered, so a later retry
/// runs against the same, untouched object.
pub(crate) fn invoke(object: &mut Object) -> FreeResult<Option<Value>> {
    let Object { storage, finalizer } = object;

    match finalizer.as_mut() {
        None => Ok(None),
        Some(hook) => match hook(&*storage) {
            Ok(value) => Ok(Some(value)),
            Err(err) => Err(FreeError::Finalizer(err)),
        },
    }
}
