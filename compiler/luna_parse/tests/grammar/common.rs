//! Shared helpers for the grammar tests.

use luna_diagnostic::ErrorCode;
use luna_ir::ast::{Chunk, Stmt};
use luna_ir::StringInterner;
use luna_parse::{parse, FeatureFlags, ParseConfig, ParseResult};

/// Every flag on, baseline edition.
pub fn all_features() -> ParseConfig {
    ParseConfig::default().with_features(FeatureFlags::all())
}

pub fn parse_with(source: &str, config: &ParseConfig) -> (ParseResult, StringInterner) {
    let interner = StringInterner::new();
    let result = parse(source, config, &interner);
    (result, interner)
}

/// Parse with every feature and insist on a clean result.
pub fn parse_ok(source: &str) -> (Chunk, StringInterner) {
    let (result, interner) = parse_with(source, &all_features());
    assert!(
        !result.has_errors(),
        "unexpected errors for {source:?}: {:?}",
        result.errors
    );
    (result.chunk, interner)
}

pub fn first_stmt(source: &str) -> (Stmt, StringInterner) {
    let (chunk, interner) = parse_ok(source);
    let stmt = chunk.block.stmts.into_iter().next().unwrap();
    (stmt, interner)
}

pub fn error_codes(source: &str, config: &ParseConfig) -> Vec<ErrorCode> {
    let (result, _) = parse_with(source, config);
    result.errors.iter().map(luna_parse::ParseError::code).collect()
}

/// Debug rendering of a tree with every `start..end` span replaced by `_`,
/// for comparing trees parsed from differently laid out text.
pub fn without_spans(chunk: &Chunk) -> String {
    let text = format!("{chunk:?}");
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        if let Some(len) = span_at(&bytes[i..]) {
            let preceded_by_digit = i > 0 && bytes[i - 1].is_ascii_alphanumeric();
            if !preceded_by_digit {
                out.push('_');
                i += len;
                continue;
            }
        }
        out.push(char::from(bytes[i]));
        i += 1;
    }
    out
}

/// Length of a `digits..digits` run at the start of `bytes`.
fn span_at(bytes: &[u8]) -> Option<usize> {
    let lhs = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if lhs == 0 || bytes.get(lhs..lhs + 2) != Some(b"..".as_slice()) {
        return None;
    }
    let rhs = bytes[lhs + 2..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    (rhs > 0).then_some(lhs + 2 + rhs)
}
