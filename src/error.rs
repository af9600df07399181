//! Error types for the reclamation engine.

use crate::heap::id::ObjectId;
use thiserror::Error;

/// Boxed error type used to carry a finalizer's own failure unchanged.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the free pipeline and by identity resolution.
///
/// None of these are retryable by the engine itself; retries, if desired,
/// are the caller's responsibility (e.g. fixing eligibility before calling
/// again).
#[derive(Debug, Error)]
pub enum FreeError {
    /// The target is a primitive-immediate value with no independent heap
    /// storage to release.
    #[error("free called for immediate value ({kind})")]
    Immediate {
        /// Kind of immediate ("nil", "boolean", "integer", "symbol").
        kind: &'static str,
    },

    /// The target is a type descriptor. Descriptors are never eligible:
    /// destroying one would invalidate category dispatch for every object
    /// that references it.
    #[error("free called for critical object `{name}`")]
    CriticalObject {
        /// Name of the protected descriptor.
        name: String,
    },

    /// The finalizer hook failed. The failure is carried unchanged; the
    /// object is left fully intact (not torn down, not poisoned) so the
    /// hook can be retried against the same state.
    #[error("finalizer raised during free: {0}")]
    Finalizer(BoxedError),

    /// The identity refers to storage that has already been released.
    #[error("stale identity {id:?}: object was freed")]
    StaleIdentity {
        /// The poisoned identity.
        id: ObjectId,
    },

    /// A second free of the same identity. Checked explicitly rather than
    /// left as undefined behavior.
    #[error("double free of {id:?}")]
    DoubleFree {
        /// The already-freed identity.
        id: ObjectId,
    },
}

/// Result type for free-pipeline and resolution operations.
pub type FreeResult<T> = Result<T, FreeError>;
