//! # reclaim
//!
//! Immediate, detectable force-free of managed heap objects.
//!
//! Most managed heaps only give storage back when a collector decides to.
//! `reclaim` implements the opposite primitive: tear down one object's
//! backing storage *right now*, synchronously, and leave its identity in a
//! state where every later access is a detectable error instead of a
//! silent view of recycled memory.
//!
//! ## Features
//!
//! - Category-tagged objects (text, sequence, table, pattern, record,
//!   big integer, foreign resource, type descriptor)
//! - Generational identities: freed slots can be reused, stale handles
//!   always fail with `StaleIdentity`, never alias the new occupant
//! - Per-instance finalizer hooks, invoked before teardown
//! - Explicit double-free detection
//! - Deferred release queue for foreign resources with external teardown
//! - Optional memory poisoning and free-site backtraces (`debug` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use reclaim::{Heap, Value};
//!
//! let heap = Heap::with_defaults();
//! let id = heap.alloc_text("hello");
//!
//! heap.free(Value::Obj(id)).unwrap();
//!
//! // The identity is now poisoned; resolution fails instead of dangling.
//! assert!(heap.resolve(id).is_err());
//! ```

pub mod api;
pub mod diagnostics;
pub mod error;
pub mod heap;
pub mod object;

mod reclaim;
mod sync;

#[cfg(feature = "debug")]
mod debug;

// Re-export public API at crate root for convenience
pub use api::config::HeapConfig;
pub use api::global::{free, free_all, global};
pub use api::stats::HeapStats;

pub use error::{BoxedError, FreeError, FreeResult};

pub use heap::id::ObjectId;
pub use heap::symbols::Sym;
pub use heap::{Finalizer, Heap};

pub use object::descriptor::{Builtin, Descriptor};
pub use object::{Category, Storage, Value};

// Diagnostics - core types and predefined codes
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use diagnostics::{set_strict_mode, strict_mode, suppress_diagnostics};
pub use diagnostics::{RC001, RC002, RC101, RC102, RC201, RC901};

/// Crate version, reported for compatibility checks by embedders.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate version as a function, for callers that want a stable symbol.
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_manifest() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
        assert!(!VERSION.is_empty());
    }
}
