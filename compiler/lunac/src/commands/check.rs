//! The `check` command: parse a file and run the type checker over it.

use luna_diagnostic::Diagnostic;
use luna_ir::StringInterner;
use luna_parse::ParseConfig;
use luna_types::{CheckConfig, Checker, TypeInterner};

use super::{display_path, read_input, report};
use crate::options::Options;

/// What `check` found in one source.
#[derive(Clone, Debug)]
pub struct CheckSummary {
    /// Parse diagnostics first, then checker diagnostics.
    pub diagnostics: Vec<Diagnostic>,
    pub statements: usize,
    pub scopes: usize,
    /// Distinct types interned while checking.
    pub types: usize,
}

impl CheckSummary {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse `source` and check it. Checking still runs over a tree with
/// recoverable parse errors; a fatal parse leaves nothing to check.
pub fn check_source(source: &str, config: &ParseConfig, check: CheckConfig) -> CheckSummary {
    let names = StringInterner::new();
    let parsed = luna_parse::parse(source, config, &names);
    let mut diagnostics = parsed.diagnostics();
    if parsed.is_fatal() {
        return CheckSummary {
            diagnostics,
            statements: 0,
            scopes: 0,
            types: 0,
        };
    }
    let types = TypeInterner::new();
    let result = Checker::new(&types, &names, check).check_chunk(&parsed.chunk);
    diagnostics.extend(result.diagnostics());
    CheckSummary {
        diagnostics,
        statements: parsed.chunk.block.stmts.len(),
        scopes: result.scopes.len(),
        types: types.len(),
    }
}

/// Check a file, report everything found and print a one-line summary on
/// success. Returns `false` on errors.
pub fn check_file(path: &str, options: &Options) -> bool {
    let content = read_input(path);
    let summary = check_source(&content, &options.config, CheckConfig::default());
    let has_errors = summary.has_errors();
    let CheckSummary {
        diagnostics,
        statements,
        scopes,
        types,
    } = summary;
    report(path, &content, diagnostics, options);
    if !has_errors {
        println!(
            "OK: {} ({statements} statements, {scopes} scopes, {types} types)",
            display_path(path)
        );
    }
    !has_errors
}
