//! Doc-comment attachment.
//!
//! A run of comments documents the declaration that follows it when each
//! comment is separated from the next one, and the last from the
//! declaration, by at most one line break. A comment on the same line as
//! the previous token is a trailing comment and never documents anything
//! after it. Parameters take every comment between the previous token and
//! the parameter, whatever the spacing.

use luna_ir::ast::DocComment;
use luna_ir::Span;
use luna_lexer::doc_text;

use crate::Parser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DocRule {
    /// At most one line break between comments and the declaration.
    Adjacent,
    /// Any spacing, used for parameters.
    Unrestricted,
}

impl Parser<'_> {
    /// Doc comment for a node whose first token is at `token_index`.
    pub(crate) fn doc_for(&self, token_index: usize, rule: DocRule) -> Option<DocComment> {
        let node = self.cursor.peek_at_index(token_index)?;
        let prev_end = match token_index.checked_sub(1) {
            Some(i) => self.cursor.peek_at_index(i).map_or(0, |t| t.span.end),
            None => 0,
        };
        let mut index = self.comments.last_before(node.span.start)?;
        let mut next_start = node.span.start;
        let mut picked = Vec::new();
        loop {
            let Some(comment) = self.comments.get(index) else {
                break;
            };
            if comment.span.start < prev_end {
                break;
            }
            if rule == DocRule::Adjacent {
                if self.cursor.newlines_between(comment.span.end, next_start) > 1 {
                    break;
                }
                if token_index > 0
                    && self.cursor.newlines_between(prev_end, comment.span.start) == 0
                {
                    break;
                }
            }
            picked.push(comment.span);
            next_start = comment.span.start;
            let Some(prev) = index.checked_sub(1) else {
                break;
            };
            index = prev;
        }
        let first = *picked.last()?;
        let last = *picked.first()?;
        let source = self.cursor.source();
        let text = picked
            .iter()
            .rev()
            .map(|span| doc_text(span.text(source)))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if text.is_empty() {
            return None;
        }
        Some(DocComment {
            text,
            span: Span::new(first.start, last.end),
        })
    }
}

#[cfg(test)]
mod tests;
