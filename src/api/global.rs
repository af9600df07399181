//! Process-wide heap and module-level free functions.
//!
//! Embedders that want one shared heap can use these instead of threading
//! a `Heap` through every call site; `free_all` here is the variadic
//! module-level entry point of the public interface.

use std::sync::OnceLock;

use crate::error::FreeResult;
use crate::heap::Heap;
use crate::object::Value;

static GLOBAL: OnceLock<Heap> = OnceLock::new();

/// The process-wide heap, created on first use with default configuration.
pub fn global() -> &'static Heap {
    GLOBAL.get_or_init(Heap::with_defaults)
}

/// Force-free one value on the process-wide heap.
pub fn free(value: Value) -> FreeResult<Value> {
    global().free(value)
}

/// Force-free a batch of values on the process-wide heap, fail-fast.
pub fn free_all(values: &[Value]) -> FreeResult<()> {
    global().free_all(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_heap_is_shared() {
        let id = global().alloc_text("shared");
        assert!(global().is_live(id));
        assert_eq!(free(Value::Obj(id)).unwrap(), Value::Nil);
        assert!(!global().is_live(id));
    }

    #[test]
    fn test_module_level_batch() {
        let a = global().alloc_text("a");
        let b = global().alloc_text("b");
        free_all(&[Value::Obj(a), Value::Obj(b)]).unwrap();
        assert!(!global().is_live(a));
        assert!(!global().is_live(b));
    }
}
