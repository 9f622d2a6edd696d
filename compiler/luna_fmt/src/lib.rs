//! Pretty-printer for luna syntax trees.
//!
//! [`format_chunk`] renders a parsed [`Chunk`] back to Luau source. The
//! output is normalised (one statement per line, four-space indentation,
//! single spaces around operators) and parses back to the same tree, up
//! to spans and the placement of comments. Only doc comments survive,
//! because they are the only comments the tree keeps.
//!
//! Trees with parse errors print their valid parts; `Error` nodes print
//! nothing.

pub mod emitter;
pub mod literal;
mod printer;

pub use emitter::{Emitter, StringEmitter, INDENT_WIDTH};
pub use printer::Printer;

use luna_ir::ast::{Chunk, Expr, TypeExpr};
use luna_ir::StringInterner;

/// Render a whole file, ending in a single newline.
#[tracing::instrument(level = "debug", skip_all)]
pub fn format_chunk(chunk: &Chunk, names: &StringInterner) -> String {
    let capacity = chunk.span.to_range().len();
    let mut printer = Printer::new(StringEmitter::with_capacity(capacity), names);
    printer.chunk(chunk);
    let mut out = printer.into_output();
    out.finish_lines();
    tracing::debug!(
        stmts = chunk.block.stmts.len(),
        bytes = out.len(),
        "formatted chunk"
    );
    out.output()
}

/// Render one expression.
pub fn format_expr(expr: &Expr, names: &StringInterner) -> String {
    let mut printer = Printer::new(StringEmitter::new(), names);
    printer.expr(expr);
    printer.into_output().output()
}

/// Render one type annotation.
pub fn format_type(ty: &TypeExpr, names: &StringInterner) -> String {
    let mut printer = Printer::new(StringEmitter::new(), names);
    printer.ty(ty);
    printer.into_output().output()
}
