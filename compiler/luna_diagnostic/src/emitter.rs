//! Diagnostic renderers.
//!
//! - [`TerminalEmitter`]: human-readable text with optional ANSI colour and
//!   source excerpts.
//! - [`JsonEmitter`]: one JSON object per line for editors and CI.

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Source text and display path used to resolve spans to lines.
#[derive(Copy, Clone, Debug)]
pub struct SourceInfo<'a> {
    pub path: &'a str,
    pub text: &'a str,
}

pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize);

    fn flush(&mut self);
}

pub(crate) fn escape_json(s: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
