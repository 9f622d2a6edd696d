//! Command handlers for the `luna` binary.
//!
//! Each command has a source-level half (`*_source`, `token_dump`) that
//! takes text and returns values, and a file-level half that reads input,
//! prints results and reports diagnostics. Only the file-level half
//! touches the terminal.

use std::io::{self, IsTerminal, Read};

use luna_diagnostic::emitter::{DiagnosticEmitter, JsonEmitter, SourceInfo, TerminalEmitter};
use luna_diagnostic::{Diagnostic, DiagnosticQueue};

use crate::options::{Options, OutputFormat};

mod check;
mod debug;
mod fmt;

pub use check::{check_file, check_source, CheckSummary};
pub use debug::{lex_file, outline, parse_file, token_dump};
pub use fmt::{format_source, run_format, FormatError};

/// Read `path`, or stdin for `-`. Exits with a message when the input
/// cannot be read.
pub(crate) fn read_input(path: &str) -> String {
    if path == "-" {
        let mut content = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut content) {
            eprintln!("error reading from stdin: {e}");
            std::process::exit(1);
        }
        return content;
    }
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
                io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Display name for an input path.
pub(crate) fn display_path(path: &str) -> &str {
    if path == "-" {
        "<stdin>"
    } else {
        path
    }
}

/// Sort, deduplicate and print `diagnostics` for one file. Returns `true`
/// when any of them is an error.
pub(crate) fn report(
    path: &str,
    text: &str,
    diagnostics: Vec<Diagnostic>,
    options: &Options,
) -> bool {
    if diagnostics.is_empty() {
        return false;
    }
    let mut queue = DiagnosticQueue::new();
    queue.extend(diagnostics);
    let errors = queue.error_count();
    let warnings = queue.warning_count();
    let diagnostics = queue.flush();
    let source = SourceInfo {
        path: display_path(path),
        text,
    };
    match options.format {
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(io::stdout().lock()).with_source(source);
            emitter.emit_all(&diagnostics);
            emitter.flush();
        }
        OutputFormat::Human => {
            let is_tty = io::stderr().is_terminal();
            let mut emitter =
                TerminalEmitter::new(io::stderr().lock(), options.color, is_tty).with_source(source);
            emitter.emit_all(&diagnostics);
            emitter.emit_summary(errors, warnings);
            emitter.flush();
        }
    }
    errors > 0
}
