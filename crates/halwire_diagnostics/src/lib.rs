//! Structured, non-fatal diagnostics for the halwire compiler.
//!
//! Naming conflicts and redundant constant assignments never abort a
//! compilation; they are reported as structured [`Diagnostic`] values with a
//! severity and a code, accumulated in a [`DiagnosticSink`], and rendered at
//! the end through a [`DiagnosticRenderer`]. Compilation always completes
//! with best-effort output; the pre-existing binding wins every conflict.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
