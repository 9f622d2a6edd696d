//! Line-delimited JSON output.

use std::fmt::Write as _;
use std::io::Write;

use luna_ir::LineIndex;

use super::{escape_json, DiagnosticEmitter, SourceInfo};
use crate::{Applicability, Diagnostic};

pub struct JsonEmitter<'a, W: Write> {
    writer: W,
    source: Option<(SourceInfo<'a>, LineIndex)>,
}

impl<'a, W: Write> JsonEmitter<'a, W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: SourceInfo<'a>) -> Self {
        let index = LineIndex::new(source.text);
        self.source = Some((source, index));
        self
    }

    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "{{\"code\":\"{}\",\"severity\":\"{}\",\"message\":\"{}\"",
            diag.code,
            diag.severity,
            escape_json(&diag.message)
        );
        if let Some((info, _)) = &self.source {
            let _ = write!(out, ",\"file\":\"{}\"", escape_json(info.path));
        }
        out.push_str(",\"labels\":[");
        for (i, label) in diag.labels.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(
                out,
                "{{\"start\":{},\"end\":{}",
                label.span.start, label.span.end
            );
            if let Some((info, index)) = &self.source {
                let pos = index.line_col(info.text, label.span.start);
                let _ = write!(out, ",\"line\":{},\"column\":{}", pos.line, pos.column);
            }
            let _ = write!(
                out,
                ",\"message\":\"{}\",\"primary\":{}}}",
                escape_json(&label.message),
                label.is_primary
            );
        }
        out.push_str("],\"notes\":[");
        for (i, note) in diag.notes.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "\"{}\"", escape_json(note));
        }
        out.push_str("],\"suggestions\":[");
        for (i, s) in diag.suggestions.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let applicability = match s.applicability {
                Applicability::MachineApplicable => "machine-applicable",
                Applicability::MaybeIncorrect => "maybe-incorrect",
                Applicability::Unspecified => "unspecified",
            };
            let _ = write!(
                out,
                "{{\"message\":\"{}\",\"start\":{},\"end\":{},\"snippet\":\"{}\",\"applicability\":\"{applicability}\"}}",
                escape_json(&s.message),
                s.span.start,
                s.span.end,
                escape_json(&s.snippet)
            );
        }
        out.push_str("]}");
        out
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let line = self.render(diagnostic);
        let _ = writeln!(self.writer, "{line}");
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let _ = writeln!(
            self.writer,
            "{{\"summary\":{{\"errors\":{error_count},\"warnings\":{warning_count}}}}}"
        );
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
