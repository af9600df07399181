//! Diagnostic emission backend.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use super::kind::{Diagnostic, DiagnosticKind};

/// Global flag to suppress diagnostic output (for testing).
static DIAGNOSTICS_SUPPRESSED: AtomicBool = AtomicBool::new(false);

/// Global flag promoting error-level diagnostics to panics.
static STRICT_MODE: AtomicBool = AtomicBool::new(false);

/// Suppress all diagnostic output.
pub fn suppress_diagnostics(suppress: bool) {
    DIAGNOSTICS_SUPPRESSED.store(suppress, Ordering::Relaxed);
}

/// Check if diagnostics are suppressed.
pub fn is_suppressed() -> bool {
    DIAGNOSTICS_SUPPRESSED.load(Ordering::Relaxed)
}

/// Enable or disable strict mode. In strict mode error-level diagnostics
/// panic, which turns silent misuse into test failures.
pub fn set_strict_mode(strict: bool) {
    STRICT_MODE.store(strict, Ordering::Relaxed);
}

/// Whether strict mode is enabled.
pub fn strict_mode() -> bool {
    STRICT_MODE.load(Ordering::Relaxed)
}

/// Emit a diagnostic to stderr.
///
/// In release builds without the `diagnostics` feature, output is a no-op;
/// the strict-mode check still applies.
pub fn emit(diag: &Diagnostic) {
    if is_suppressed() {
        return;
    }

    #[cfg(any(debug_assertions, feature = "diagnostics"))]
    emit_to_stderr(diag, None);

    #[cfg(feature = "log")]
    emit_to_log(diag);

    if diag.kind == DiagnosticKind::Error && strict_mode() {
        panic!(
            "[reclaim][{}] {}\nStrict mode enabled - errors are fatal.",
            diag.code, diag.message
        );
    }
}

/// Emit a diagnostic with additional runtime context.
pub fn emit_with_context(diag: &Diagnostic, context: &str) {
    if is_suppressed() {
        return;
    }

    #[cfg(any(debug_assertions, feature = "diagnostics"))]
    emit_to_stderr(diag, Some(context));

    #[cfg(feature = "log")]
    emit_to_log(diag);

    if diag.kind == DiagnosticKind::Error && strict_mode() {
        panic!(
            "[reclaim][{}] {}\nContext: {}\nStrict mode enabled - errors are fatal.",
            diag.code, diag.message, context
        );
    }
}

#[cfg(any(debug_assertions, feature = "diagnostics"))]
fn emit_to_stderr(diag: &Diagnostic, context: Option<&str>) {
    let mut stderr = std::io::stderr();

    let _ = writeln!(
        stderr,
        "[reclaim][{}] {}: {}",
        diag.code,
        diag.kind.prefix(),
        diag.message
    );

    if let Some(context) = context {
        let _ = writeln!(stderr, "  context: {}", context);
    }
    if let Some(note) = diag.note {
        let _ = writeln!(stderr, "  note: {}", note);
    }
    if let Some(help) = diag.help {
        let _ = writeln!(stderr, "  help: {}", help);
    }

    let _ = writeln!(stderr);
}

/// Emit a diagnostic through the log crate.
#[cfg(feature = "log")]
pub fn emit_to_log(diag: &Diagnostic) {
    match diag.kind {
        DiagnosticKind::Error => log::error!("[{}] {}", diag.code, diag.message),
        DiagnosticKind::Warning => log::warn!("[{}] {}", diag.code, diag.message),
        DiagnosticKind::Note => log::info!("[{}] {}", diag.code, diag.message),
    }
}
