//! Diagnostic kinds and the predefined code set.

/// The severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A hard error - something is definitely wrong.
    Error,
    /// A warning - something is probably wrong or suboptimal.
    Warning,
    /// Additional context about another diagnostic.
    Note,
}

impl DiagnosticKind {
    /// Display prefix for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Note => "note",
        }
    }
}

/// A diagnostic message with code, message, and optional context.
///
/// Diagnostic codes follow the pattern:
/// - `RC0xx` - eligibility misuse
/// - `RC1xx` - identity/resolution issues
/// - `RC2xx` - finalizer issues
/// - `RC9xx` - internal errors
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level.
    pub kind: DiagnosticKind,
    /// Diagnostic code (e.g., "RC101").
    pub code: &'static str,
    /// Primary message.
    pub message: &'static str,
    /// Optional additional context.
    pub note: Option<&'static str>,
    /// Optional fix suggestion.
    pub help: Option<&'static str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub const fn error(code: &'static str, message: &'static str) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            code,
            message,
            note: None,
            help: None,
        }
    }

    /// Create a new warning diagnostic.
    pub const fn warning(code: &'static str, message: &'static str) -> Self {
        Self {
            kind: DiagnosticKind::Warning,
            code,
            message,
            note: None,
            help: None,
        }
    }

    /// Add a note to this diagnostic.
    pub const fn with_note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }

    /// Add a help message to this diagnostic.
    pub const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

// =============================================================================
// Predefined diagnostics (RC0xx - eligibility)
// =============================================================================

/// RC001: Free called for an immediate value.
pub const RC001: Diagnostic = Diagnostic::error(
    "RC001",
    "free called for an immediate value",
)
.with_note("immediates (nil, booleans, integers, symbols) have no heap storage to release")
.with_help("only Value::Obj targets can be freed; check with Value::is_immediate()");

/// RC002: Free called for a critical object.
pub const RC002: Diagnostic = Diagnostic::error(
    "RC002",
    "free called for a critical object",
)
.with_note("type descriptors anchor category dispatch for every object typed by them")
.with_help("descriptors live as long as the heap; there is nothing to reclaim");

// =============================================================================
// Predefined diagnostics (RC1xx - identity)
// =============================================================================

/// RC101: Stale identity resolved.
pub const RC101: Diagnostic = Diagnostic::warning(
    "RC101",
    "resolved an identity whose object was freed",
)
.with_note("the slot is tombstoned or its generation moved on")
.with_help("treat identities as invalid after free, or check is_live() first");

/// RC102: Double free detected.
pub const RC102: Diagnostic = Diagnostic::error(
    "RC102",
    "attempted to free an already-freed object",
)
.with_note("the identity's slot is already a tombstone")
.with_help("each object may be force-freed exactly once");

// =============================================================================
// Predefined diagnostics (RC2xx - finalizers)
// =============================================================================

/// RC201: Finalizer hook failed.
pub const RC201: Diagnostic = Diagnostic::warning(
    "RC201",
    "finalizer raised; the object was left intact",
)
.with_note("teardown and poisoning were skipped so the hook can retry")
.with_help("fix the hook's failure condition and free the object again");

// =============================================================================
// Predefined diagnostics (RC9xx - internal)
// =============================================================================

/// RC901: Internal engine error.
pub const RC901: Diagnostic = Diagnostic::error(
    "RC901",
    "internal reclamation engine error",
)
.with_note("this indicates a bug in reclaim")
.with_help("please report this issue at the reclaim repository");
