//! Diagnostics shared by every phase.
//!
//! A [`Diagnostic`] carries an [`ErrorCode`] for searchability, a message
//! naming what went wrong, labelled spans showing where, and optional notes
//! and suggestions. Phases convert their own error types into diagnostics;
//! the [`DiagnosticQueue`] sorts and trims them and an emitter renders them.

mod diagnostic;
pub mod emitter;
mod error_code;
mod queue;

pub use diagnostic::{Applicability, Diagnostic, Label, Severity, Suggestion};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
