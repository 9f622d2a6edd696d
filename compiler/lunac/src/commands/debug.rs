//! Debug commands: `lex` and `parse` for inspecting the front-end.

use std::fmt::Write as _;

use luna_ir::ast::{Chunk, StmtKind};
use luna_ir::{LineIndex, StringInterner};
use luna_parse::ParseConfig;

use super::{display_path, read_input, report};
use crate::options::Options;

/// One line per token: position, kind and lexeme.
pub fn token_dump(source: &str, config: &ParseConfig, interner: &StringInterner) -> String {
    let lexed = luna_lexer::lex(source, config.scan_options(), interner);
    let mut out = String::new();
    for token in lexed.tokens.iter() {
        let _ = writeln!(
            out,
            "{}:{} {:?} {:?}",
            token.line,
            token.column,
            token.kind,
            token.lexeme(source)
        );
    }
    out
}

/// One line per top-level statement: position and statement kind.
pub fn outline(chunk: &Chunk, source: &str) -> String {
    let index = LineIndex::new(source);
    let mut out = String::new();
    for stmt in &chunk.block.stmts {
        let at = index.line_col(source, stmt.span.start);
        let _ = writeln!(out, "{at} {}", stmt_label(&stmt.kind));
    }
    out
}

fn stmt_label(kind: &StmtKind) -> &'static str {
    match kind {
        StmtKind::Local(local) => local.kind.keyword(),
        StmtKind::Assign(_) => "assignment",
        StmtKind::CompoundAssign(_) => "compound assignment",
        StmtKind::Expr(_) => "call",
        StmtKind::Do(_) => "do",
        StmtKind::While(_) => "while",
        StmtKind::Repeat(_) => "repeat",
        StmtKind::If(_) => "if",
        StmtKind::NumericFor(_) => "numeric for",
        StmtKind::GenericFor(_) => "generic for",
        StmtKind::Function(_) => "function",
        StmtKind::LocalFunction(_) => "local function",
        StmtKind::Return(_) => "return",
        StmtKind::Break => "break",
        StmtKind::Continue => "continue",
        StmtKind::TypeAlias(_) => "type alias",
        StmtKind::DeclareGlobal(_) => "declare global",
        StmtKind::DeclareFunction(_) => "declare function",
        StmtKind::DeclareClass(_) => "declare class",
        StmtKind::Error => "error",
    }
}

/// Lex a file and print its token stream. Returns `false` on lex errors.
pub fn lex_file(path: &str, options: &Options) -> bool {
    let content = read_input(path);
    let interner = StringInterner::new();
    let lexed = luna_lexer::lex(&content, options.config.scan_options(), &interner);
    println!(
        "Tokens for '{}' ({} tokens):",
        display_path(path),
        lexed.tokens.len()
    );
    print!("{}", token_dump(&content, &options.config, &interner));
    let diagnostics = lexed.errors.iter().map(luna_lexer::LexError::to_diagnostic);
    !report(path, &content, diagnostics.collect(), options)
}

/// Parse a file and print a statement outline. Returns `false` on errors.
pub fn parse_file(path: &str, options: &Options) -> bool {
    let content = read_input(path);
    let interner = StringInterner::new();
    let result = luna_parse::parse(&content, &options.config, &interner);
    println!("Parse result for '{}':", display_path(path));
    println!("  Statements: {}", result.chunk.block.stmts.len());
    println!("  Errors: {}", result.lex_errors.len() + result.errors.len());
    if !result.chunk.block.stmts.is_empty() {
        println!();
        print!("{}", outline(&result.chunk, &content));
    }
    !report(path, &content, result.diagnostics(), options)
}
