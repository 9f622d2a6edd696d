//! Recursive-descent parser for Luau.
//!
//! [`parse`] lexes and parses one file under an explicit [`ParseConfig`]
//! and always returns a best-effort [`Chunk`] together with every error it
//! found. Statement-level recovery skips to the next statement boundary, so
//! one mistake does not hide the ones after it. Nesting deeper than
//! [`ParseConfig::max_depth`] and oversized input are the only fatal
//! conditions; they replace the tree with an empty chunk and a single error.

mod config;
mod cursor;
mod doc;
mod error;
mod grammar;
mod recovery;
mod stack;
mod words;

pub use config::{Edition, FeatureFlags, ParseConfig, ParseMode, UnknownEdition, FEATURE_NAMES};
pub use cursor::Cursor;
pub use error::{ErrorContext, ParseError, ParseErrorKind};
pub use luna_lexer::LongBracketMode;
pub use recovery::{synchronize, TokenSet};

use luna_diagnostic::Diagnostic;
use luna_ir::ast::{Block, Chunk, Stmt, StmtKind};
use luna_ir::{CommentList, Span, StringInterner, Token, TokenKind};
use luna_lexer::{LexError, LexOutput};

use crate::recovery::{at_line_statement_start, BLOCK_END, STMT_BOUNDARY};
use crate::stack::ensure_sufficient_stack;
use crate::words::Words;

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Everything [`parse`] produces for one file.
#[derive(Clone, Debug)]
pub struct ParseResult {
    pub chunk: Chunk,
    pub lex_errors: Vec<LexError>,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    fn fatal(error: ParseError) -> Self {
        ParseResult {
            chunk: Chunk::default(),
            lex_errors: Vec::new(),
            errors: vec![error],
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.lex_errors.is_empty() || !self.errors.is_empty()
    }

    /// True when a fatal limit stopped the parse.
    pub fn is_fatal(&self) -> bool {
        self.errors.iter().any(ParseError::is_fatal)
    }

    /// Lex errors first, then parse errors, each in source order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lex_errors
            .iter()
            .map(LexError::to_diagnostic)
            .chain(self.errors.iter().map(ParseError::to_diagnostic))
            .collect()
    }
}

/// Lex and parse `source`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str, config: &ParseConfig, interner: &StringInterner) -> ParseResult {
    if source.len() > config.max_source_len {
        return ParseResult::fatal(ParseError::new(
            ParseErrorKind::SourceTooLarge {
                len: source.len(),
                limit: config.max_source_len,
            },
            Span::point(0),
        ));
    }
    let lexed = luna_lexer::lex(source, config.scan_options(), interner);
    parse_lexed(source, lexed, config, interner)
}

/// Parse an already lexed file. `lexed` must come from `source` lexed with
/// `config.scan_options()`.
pub fn parse_lexed(
    source: &str,
    lexed: LexOutput,
    config: &ParseConfig,
    interner: &StringInterner,
) -> ParseResult {
    let LexOutput {
        tokens,
        comments,
        errors: lex_errors,
    } = lexed;
    let mut parser = Parser::new(Cursor::new(&tokens, source), &comments, interner, config);
    let chunk = parser.parse_chunk();
    if let Some(fatal) = parser.fatal {
        tracing::debug!(error = %fatal, "parse aborted");
        return ParseResult {
            lex_errors,
            ..ParseResult::fatal(fatal)
        };
    }
    tracing::debug!(
        stmts = chunk.block.stmts.len(),
        errors = parser.errors.len(),
        "parsed chunk"
    );
    ParseResult {
        chunk,
        lex_errors,
        errors: parser.errors,
    }
}

/// Parser state: the token cursor, the error sink and the nesting depth.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    comments: &'a CommentList,
    interner: &'a StringInterner,
    config: &'a ParseConfig,
    words: Words,
    errors: Vec<ParseError>,
    fatal: Option<ParseError>,
    depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(
        cursor: Cursor<'a>,
        comments: &'a CommentList,
        interner: &'a StringInterner,
        config: &'a ParseConfig,
    ) -> Self {
        Parser {
            cursor,
            comments,
            interner,
            config,
            words: Words::new(interner),
            errors: Vec::new(),
            fatal: None,
            depth: 0,
        }
    }

    // ─── Cursor delegation ───

    #[inline]
    fn current_kind(&self) -> TokenKind {
        *self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn eat(&mut self, kind: &TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    #[inline]
    fn advance(&mut self) -> Token {
        self.cursor.advance()
    }

    #[inline]
    fn expect(&mut self, kind: &TokenKind) -> PResult<Token> {
        self.cursor.expect(kind)
    }

    /// Span from `start` to the end of the last consumed token.
    #[inline]
    fn span_from(&self, start: Span) -> Span {
        start.to(self.previous_span())
    }

    /// Expect the closer of a bracketed construct. A missing closer is
    /// reported as unclosed, pointing back at `open`.
    fn expect_closing(&mut self, closer: &TokenKind, open: &Token) -> PResult<Token> {
        if self.check(closer) {
            return Ok(self.advance());
        }
        Err(ParseError::new(
            ParseErrorKind::UnclosedDelimiter {
                delimiter: open.kind.display_name(),
                opened_at: open.span,
            },
            self.current_span(),
        )
        .with_expected(format!("`{}`", closer.display_name()))
        .with_found(self.cursor.describe_current()))
    }

    // ─── Errors ───

    /// Record a recoverable error and keep parsing.
    fn error(&mut self, error: ParseError) {
        if self.errors.len() < self.config.error_limit {
            self.errors.push(error);
        }
    }

    /// Record that `feature` was used without its flag.
    fn require_feature(&mut self, flag: FeatureFlags, feature: &'static str, span: Span) {
        if !self.config.allows(flag) {
            self.error(ParseError::new(
                ParseErrorKind::FeatureDisabled {
                    feature,
                    flag: flag.name(),
                },
                span,
            ));
        }
    }

    /// Parsing stops once a fatal error occurred or the error limit is hit.
    fn should_stop(&self) -> bool {
        self.fatal.is_some() || self.errors.len() >= self.config.error_limit
    }

    /// Run `f` one level deeper, failing fatally past the depth limit.
    fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.config.max_depth {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep {
                    limit: self.config.max_depth,
                },
                self.current_span(),
            ));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    /// Attach `context` to an error coming out of `f`.
    fn in_error_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        f(self).map_err(|e| e.in_context(context))
    }

    /// Skip to the next statement boundary after a failed statement: a
    /// statement keyword, a block closer, or a name or `(` that opens a
    /// new line.
    fn synchronize_statement(&mut self) {
        let words = self.words;
        synchronize(&mut self.cursor, STMT_BOUNDARY, |c| {
            words.starts_contextual_statement(c) || at_line_statement_start(c)
        });
    }

    // ─── Entry ───

    /// Parse the whole token stream. Stray block closers at top level are
    /// reported and skipped.
    pub fn parse_chunk(&mut self) -> Chunk {
        let mut block = self.block_statements();
        while !self.cursor.is_at_end() && !self.should_stop() {
            let err = self.cursor.unexpected("statement");
            self.error(err);
            self.advance();
            let rest = self.block_statements();
            block.stmts.extend(rest.stmts);
        }
        let end = u32::try_from(self.cursor.source().len()).unwrap_or(u32::MAX);
        let span = Span::new(0, end);
        block.span = span;
        Chunk { block, span }
    }

    /// A nested block, counted against the depth limit.
    fn parse_block(&mut self) -> PResult<Block> {
        self.guarded(|p| Ok(p.block_statements()))
    }

    /// Statements up to the next block closer.
    fn block_statements(&mut self) -> Block {
        let start = self.current_span().start;
        let mut stmts = Vec::new();
        while !self.should_stop() && !BLOCK_END.contains(self.cursor.current_kind()) {
            if self.eat(&TokenKind::Semicolon) {
                continue;
            }
            let before = self.cursor.position();
            let stmt_start = self.current_span();
            match self.parse_stmt() {
                Ok(stmt) => {
                    let ends_block = matches!(stmt.kind, StmtKind::Return(_));
                    stmts.push(stmt);
                    self.eat(&TokenKind::Semicolon);
                    if ends_block && !BLOCK_END.contains(self.cursor.current_kind()) {
                        let err = self.cursor.unexpected("end of block after `return`");
                        self.error(err);
                    }
                }
                Err(err) if err.is_fatal() => {
                    self.fatal.get_or_insert(err);
                    break;
                }
                Err(err) => {
                    self.error(err);
                    self.synchronize_statement();
                    if self.cursor.position() == before
                        && !BLOCK_END.contains(self.cursor.current_kind())
                    {
                        self.advance();
                    }
                    let span = self.span_from(stmt_start);
                    stmts.push(Stmt::new(StmtKind::Error, span));
                }
            }
        }
        let end = stmts.last().map_or(start, |s| s.span.end).max(start);
        Block {
            stmts,
            span: Span::new(start, end),
        }
    }
}
