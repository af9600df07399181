//! Advisory diagnostics for misuse of the free pipeline.
//!
//! Errors are always returned to the caller through `FreeError`; these
//! diagnostics are the observability layer on top — coded messages on
//! stderr (debug builds, or release with the `diagnostics` feature), an
//! optional `log`-crate bridge, and a strict mode that promotes
//! error-level diagnostics to panics for tests and CI.

mod emit;
mod kind;

pub use self::emit::{emit, emit_with_context, is_suppressed, suppress_diagnostics};
pub use self::emit::{set_strict_mode, strict_mode};
pub use self::kind::{Diagnostic, DiagnosticKind};
pub use self::kind::{RC001, RC002, RC101, RC102, RC201, RC901};

#[cfg(feature = "log")]
pub use self::emit::emit_to_log;
