//! Human-readable output.

use std::io::{self, Write};

use luna_ir::{LineIndex, Span};

use super::{DiagnosticEmitter, SourceInfo};
use crate::{Diagnostic, Label, Severity};

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colour when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

pub struct TerminalEmitter<'a, W: Write> {
    writer: W,
    colors: bool,
    source: Option<(SourceInfo<'a>, LineIndex)>,
}

impl<'a, W: Write> TerminalEmitter<'a, W> {
    pub fn new(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Resolve spans against `source` and print excerpts.
    #[must_use]
    pub fn with_source(mut self, source: SourceInfo<'a>) -> Self {
        let index = LineIndex::new(source.text);
        self.source = Some((source, index));
        self
    }

    fn paint(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_header(&mut self, diag: &Diagnostic) {
        let color = match diag.severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        let head = format!("{}[{}]", diag.severity, diag.code);
        self.paint(&head, color);
        if self.colors {
            let _ = writeln!(self.writer, "{}: {}{}", colors::BOLD, diag.message, colors::RESET);
        } else {
            let _ = writeln!(self.writer, ": {}", diag.message);
        }
    }

    fn write_label(&mut self, label: &Label) {
        let Some((info, index)) = &self.source else {
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = writeln!(self.writer, "  {marker} {:?}: {}", label.span, label.message);
            return;
        };
        let (path, text) = (info.path, info.text);
        let pos = index.line_col(text, label.span.start);
        let line_text = index.line_text(text, label.span);
        let number = pos.line.to_string();
        let pad = number.len();

        let _ = writeln!(
            self.writer,
            "{}--> {path}:{}:{}",
            " ".repeat(pad + 1),
            pos.line,
            pos.column
        );
        let gutter = format!("{}|", " ".repeat(pad + 2));
        self.paint(&gutter, colors::GUTTER);
        let _ = writeln!(self.writer);
        self.paint(&format!(" {number} |"), colors::GUTTER);
        let _ = writeln!(self.writer, " {line_text}");
        self.paint(&gutter, colors::GUTTER);

        let marks = underline_width(line_text, pos.column, label.span);
        let mark = if label.is_primary { "^" } else { "-" };
        let underline = format!("{}{}", " ".repeat(pos.column as usize - 1), mark.repeat(marks));
        let _ = write!(self.writer, " ");
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::GUTTER
        };
        self.paint(&underline, color);
        if label.message.is_empty() {
            let _ = writeln!(self.writer);
        } else {
            let _ = writeln!(self.writer, " {}", label.message);
        }
    }
}

/// Number of marker characters: the span clipped to its first line, at
/// least one.
fn underline_width(line_text: &str, column: u32, span: Span) -> usize {
    let remaining = line_text
        .chars()
        .count()
        .saturating_sub(column as usize - 1);
    (span.len() as usize).min(remaining).max(1)
}

impl TerminalEmitter<'static, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::new(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_header(diagnostic);
        for label in &diagnostic.labels {
            self.write_label(label);
        }
        for note in &diagnostic.notes {
            let _ = writeln!(self.writer, "  = note: {note}");
        }
        for suggestion in &diagnostic.suggestions {
            let _ = writeln!(self.writer, "  = help: {}", suggestion.message);
        }
        let _ = writeln!(self.writer);
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if warning_count > 0 {
            let s = if warning_count == 1 { "" } else { "s" };
            self.paint("warning", colors::WARNING);
            let _ = writeln!(self.writer, ": {warning_count} warning{s} emitted");
        }
        if error_count > 0 {
            let s = if error_count == 1 { "" } else { "s" };
            self.paint("error", colors::ERROR);
            let _ = writeln!(
                self.writer,
                ": aborting due to {error_count} previous error{s}"
            );
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
