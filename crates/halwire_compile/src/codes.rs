//! Diagnostic codes emitted by the compiler.

use halwire_diagnostics::{Category, DiagnosticCode};

/// A pin was asked to adopt a second, different signal name.
pub const SIGNAL_NAME_CONFLICT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 201);

/// A destination received two different explicit signal-name overrides.
pub const OVERRIDE_CONFLICT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 202);

/// A constant was assigned to a pin that already carries a live signal.
pub const REDUNDANT_CONSTANT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 203);
