//! Lexer for Luau source.
//!
//! [`Lexer`] is a lazy iterator over cooked [`Token`]s, comments included.
//! [`lex`] runs it to completion and splits the result into a
//! [`TokenList`] for the parser, a [`CommentList`] for doc-comment
//! attachment and the collected [`LexError`]s.

mod comments;
mod cook_escape;
mod cooker;
mod keywords;
mod lex_error;

use luna_ir::{Comment, CommentList, LineIndex, Span, StringInterner, Token, TokenKind, TokenList};
use luna_lexer_core::{Cursor, RawScanner, RawTag};
pub use luna_lexer_core::{LongBracketMode, ScanOptions};

use crate::cooker::TokenCooker;

pub use comments::{comment_kind, doc_text};
pub use lex_error::{LexError, LexErrorKind};

/// Everything [`lex`] produces for one file.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    /// Significant tokens, terminated by `Eof`.
    pub tokens: TokenList,
    pub comments: CommentList,
    pub errors: Vec<LexError>,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lazy token stream. Yields comments as [`TokenKind::Comment`] tokens and
/// ends with exactly one `Eof` token.
pub struct Lexer<'src> {
    source: &'src str,
    scanner: RawScanner<'src>,
    cooker: TokenCooker<'src>,
    lines: LineIndex,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, options: ScanOptions, interner: &'src StringInterner) -> Self {
        let mut cursor = Cursor::new(source);
        if source.starts_with('\u{feff}') {
            cursor.advance_n('\u{feff}'.len_utf8());
        }
        Lexer {
            source,
            scanner: RawScanner::new(cursor, options),
            cooker: TokenCooker::new(source, interner),
            lines: LineIndex::new(source),
            done: false,
        }
    }

    /// Errors recorded so far.
    pub fn errors(&self) -> &[LexError] {
        self.cooker.errors()
    }

    pub fn into_errors(self) -> Vec<LexError> {
        self.cooker.into_errors()
    }

    fn make_token(&self, kind: TokenKind, span: Span) -> Token {
        let at = self.lines.line_col(self.source, span.start);
        Token {
            kind,
            span,
            line: at.line,
            column: at.column,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        loop {
            let start = self.scanner.pos();
            let raw = self.scanner.next_token();
            if raw.tag == RawTag::Eof {
                self.done = true;
                return Some(self.make_token(TokenKind::Eof, Span::point(start)));
            }
            if let Some(kind) = self.cooker.cook(raw.tag, start, raw.len) {
                return Some(self.make_token(kind, Span::new(start, start + raw.len)));
            }
        }
    }
}

/// Lex `source` to completion.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str, options: ScanOptions, interner: &StringInterner) -> LexOutput {
    let mut lexer = Lexer::new(source, options, interner);
    let mut tokens = TokenList::new();
    let mut comments = CommentList::new();
    for token in lexer.by_ref() {
        if token.kind == TokenKind::Comment {
            comments.push(Comment {
                kind: comment_kind(token.lexeme(source)),
                span: token.span,
            });
        } else {
            tokens.push(token);
        }
    }
    let errors = lexer.into_errors();
    tracing::debug!(
        tokens = tokens.len(),
        comments = comments.len(),
        errors = errors.len(),
        "lexed"
    );
    LexOutput {
        tokens,
        comments,
        errors,
    }
}
