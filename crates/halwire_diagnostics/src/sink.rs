//! Diagnostic accumulator shared by reference across a compilation session.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::Mutex;

/// Accumulates diagnostics emitted during a compilation session.
///
/// The sink is passed by shared reference through the whole compile path,
/// so it uses interior mutability. A compilation session is single-threaded
/// by design; the `Mutex` exists for the shared-reference API, not for
/// cross-thread contention.
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a diagnostic into the sink.
    pub fn emit(&self, diag: Diagnostic) {
        self.diagnostics.lock().unwrap().push(diag);
    }

    /// Returns `true` if no diagnostics have been emitted.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().unwrap().is_empty()
    }

    /// Returns the number of diagnostics emitted so far.
    pub fn len(&self) -> usize {
        self.diagnostics.lock().unwrap().len()
    }

    /// Returns `true` if any error-severity diagnostics have been emitted.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .lock()
            .unwrap()
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock().unwrap())
    }

    /// Returns a snapshot of all accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }
}
