//! Comment classification and doc-text normalisation.

use luna_ir::CommentKind;
use luna_lexer_core::long_bracket_level;

/// Whether the comment lexeme `text` (starting with `--`) is a block
/// comment.
pub fn comment_kind(text: &str) -> CommentKind {
    let body = text.strip_prefix("--").unwrap_or(text);
    if long_bracket_level(body.as_bytes()).is_some() {
        CommentKind::Block
    } else {
        CommentKind::Line
    }
}

/// Display text of a comment used as documentation.
///
/// Drops the `--` marker and any long brackets, then strips runs of `-`
/// and surrounding whitespace at both ends, so `--- Adds two numbers ---`
/// and `--[[ Adds two numbers ]]` both read `Adds two numbers`.
pub fn doc_text(text: &str) -> &str {
    let body = text.strip_prefix("--").unwrap_or(text);
    let body = match long_bracket_level(body.as_bytes()) {
        Some(level) => {
            let level = usize::from(level);
            let inner = body.get(level + 2..).unwrap_or("");
            let closing_len = level + 2;
            let terminated = inner.len() >= closing_len
                && inner.ends_with(']')
                && inner[..inner.len() - 1].ends_with(&"=".repeat(level))
                && inner[..inner.len() - 1 - level].ends_with(']');
            if terminated {
                &inner[..inner.len() - closing_len]
            } else {
                inner
            }
        }
        None => body,
    };
    body.trim()
        .trim_start_matches('-')
        .trim_end_matches('-')
        .trim()
}
