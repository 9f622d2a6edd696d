//! Token cursor.
//!
//! The cursor is the parser's only mutable navigation state. It never moves
//! past the final `Eof` token, so `current()` is always valid.

use luna_ir::{Name, Span, Token, TokenKind, TokenList};

use crate::error::{ParseError, ParseErrorKind};

/// Cursor over a lexed token stream.
///
/// Provides token access, lookahead and consumption. The position always
/// names a real token or, for an empty stream, the synthesized `Eof`.
#[derive(Clone)]
pub struct Cursor<'a> {
    tokens: &'a [Token],
    source: &'a str,
    pos: usize,
    /// Returned for reads past the end of a stream with no tokens.
    eof: Token,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the first token of `tokens`.
    ///
    /// `source` is the text the tokens were lexed from; it is used for
    /// token descriptions in error messages and for line counting.
    pub fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        let tokens = tokens.as_slice();
        let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
        let eof = tokens.last().copied().unwrap_or(Token {
            kind: TokenKind::Eof,
            span: Span::point(end),
            line: 1,
            column: 1,
        });
        Cursor {
            tokens,
            source,
            pos: 0,
            eof,
        }
    }

    /// The source text behind the tokens.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Index of the current token.
    ///
    /// Used for save/restore around speculation and for progress tracking:
    /// compare positions before and after a parse to see whether tokens
    /// were consumed.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor to `pos`, as returned by [`Cursor::position`].
    ///
    /// Positions past the end clamp to the final `Eof` token.
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len().saturating_sub(1));
    }

    /// The current token.
    ///
    /// Always valid: the stream ends in `Eof` and the cursor never moves
    /// past it.
    #[inline]
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// The current token's kind.
    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// The current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token, or an empty span at the start.
    pub fn previous_span(&self) -> Span {
        match self.previous() {
            Some(token) => token.span,
            None => Span::point(0),
        }
    }

    /// The last consumed token, if any.
    fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// Token `n` places ahead of the current one.
    ///
    /// `peek(0)` is the current token, `peek(1)` the next. Returns the
    /// `Eof` token past the end of the stream.
    pub fn peek(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&self.eof)
    }

    /// Token at an absolute index, as returned by [`Cursor::position`].
    pub fn peek_at_index(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Kind of the token `n` places ahead. See [`Cursor::peek`].
    #[inline]
    pub fn peek_kind(&self, n: usize) -> &TokenKind {
        &self.peek(n).kind
    }

    /// Check if the cursor is on the final `Eof` token.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check if the current token has the same kind as `kind`.
    ///
    /// Payloads are ignored, so `TokenKind::Ident(Name::EMPTY)` matches
    /// every identifier.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().discriminant_index() == kind.discriminant_index()
    }

    /// Like [`Cursor::check`], for the token after the current one.
    #[inline]
    pub fn check_next(&self, kind: &TokenKind) -> bool {
        self.peek_kind(1).discriminant_index() == kind.discriminant_index()
    }

    /// Name of the current identifier, if it is one.
    #[inline]
    pub fn check_ident(&self) -> Option<Name> {
        match self.current_kind() {
            TokenKind::Ident(name) => Some(*name),
            _ => None,
        }
    }

    /// True when the current token is the identifier `word`.
    ///
    /// Contextual keywords (`type`, `export`, `continue` and the like) are
    /// lexed as identifiers and recognised through this check.
    #[inline]
    pub fn check_word(&self, word: Name) -> bool {
        self.check_ident() == Some(word)
    }

    /// Check if the token after the current one is an identifier.
    #[inline]
    pub fn next_is_ident(&self) -> bool {
        matches!(self.peek_kind(1), TokenKind::Ident(_))
    }

    /// True when the current token is the first one on its line.
    ///
    /// The first token of the stream counts as starting a line.
    pub fn starts_line(&self) -> bool {
        match self.previous() {
            Some(previous) => previous.line < self.current().line,
            None => true,
        }
    }

    /// True when `span2` starts exactly where `span1` ends.
    pub fn spans_adjacent(span1: Span, span2: Span) -> bool {
        span1.end == span2.start
    }

    /// True when the next token starts right where the current one ends.
    ///
    /// Distinguishes `<<` written as two touching `<` tokens from `< <`.
    pub fn current_and_next_adjacent(&self) -> bool {
        Self::spans_adjacent(self.current_span(), self.peek(1).span)
    }

    /// True when the current token starts right where the previous one ends.
    pub fn touches_previous(&self) -> bool {
        self.pos > 0 && Self::spans_adjacent(self.previous_span(), self.current_span())
    }

    /// Consume the current token and return it.
    ///
    /// On `Eof` the cursor stays put, so repeated calls keep returning
    /// `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = *self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has `kind`. Returns whether it did.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the identifier `word` if it is current.
    pub fn eat_word(&mut self, word: Name) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Source text of the current token, quoted for messages.
    ///
    /// Long lexemes are cut after 24 characters; `Eof` reads as
    /// "end of file".
    pub fn describe_current(&self) -> String {
        describe(self.current(), self.source)
    }

    /// Consume a token of `kind` or fail without moving.
    ///
    /// # Errors
    ///
    /// Returns an `UnexpectedToken` error naming `kind` as expected and
    /// the current token as found.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(format!("`{}`", kind.display_name())))
        }
    }

    /// Consume an identifier, reserved words excluded.
    ///
    /// # Errors
    ///
    /// Returns `ExpectedIdent` if the current token is not an identifier.
    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        match *self.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name, span))
            }
            _ => Err(ParseError::new(ParseErrorKind::ExpectedIdent, self.current_span())
                .with_expected("identifier")
                .with_found(self.describe_current())),
        }
    }

    /// An `UnexpectedToken` error at the current token.
    pub fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::new(ParseErrorKind::UnexpectedToken, self.current_span())
            .with_expected(expected)
            .with_found(self.describe_current())
    }

    /// Number of line breaks in the source between two offsets.
    ///
    /// Doc-comment attachment uses this to tell an adjacent comment from
    /// one separated by a blank line.
    pub fn newlines_between(&self, start: u32, end: u32) -> usize {
        Span::new(start, end.max(start))
            .text(self.source)
            .bytes()
            .filter(|&b| b == b'\n')
            .count()
    }
}

pub(crate) fn describe(token: &Token, source: &str) -> String {
    match token.kind {
        TokenKind::Eof => "end of file".to_owned(),
        _ => {
            let text = token.lexeme(source);
            let mut chars = text.chars();
            let short: String = chars.by_ref().take(24).collect();
            if chars.next().is_some() {
                format!("`{short}...`")
            } else {
                format!("`{short}`")
            }
        }
    }
}
