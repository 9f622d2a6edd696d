//! Lexer errors.
//!
//! Errors never stop lexing: the offending text becomes a
//! [`TokenKind::Error`](luna_ir::TokenKind::Error) token (or a literal with
//! a best-effort value) and a [`LexError`] is recorded next to it.

use luna_diagnostic::{Diagnostic, ErrorCode, Suggestion};
use luna_ir::Span;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum LexErrorKind {
    /// Missing closing quote, long bracket or backtick.
    #[error("unterminated {what}")]
    UnterminatedString { what: &'static str },
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// `[=` with no second `[`.
    #[error("malformed long bracket: expected `[` after `=` signs")]
    MalformedLongBracket,
    #[error("malformed escape sequence: {reason}")]
    MalformedEscape { reason: &'static str },
    #[error("malformed number `{text}`")]
    MalformedNumber { text: String },
    #[error("unexpected character `{found}`")]
    UnexpectedCharacter { found: char },
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString { .. } => ErrorCode::E0001,
            LexErrorKind::UnexpectedCharacter { .. } => ErrorCode::E0002,
            LexErrorKind::MalformedNumber { .. } => ErrorCode::E0003,
            LexErrorKind::UnterminatedComment => ErrorCode::E0004,
            LexErrorKind::MalformedEscape { .. } => ErrorCode::E0005,
            LexErrorKind::MalformedLongBracket => ErrorCode::E0006,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, self.label());
        match &self.kind {
            LexErrorKind::UnexpectedCharacter { found: '!' } => {
                diag.with_suggestion(Suggestion::maybe_incorrect(
                    "Luau spells logical negation `not` and inequality `~=`",
                    self.span,
                    "not ",
                ))
            }
            LexErrorKind::UnexpectedCharacter { found: '~' } => diag.with_note(
                "`~` only appears in `~=`; bitwise operators are in the `bit32` library",
            ),
            LexErrorKind::MalformedLongBracket => {
                diag.with_note("long brackets are written `[[...]]` or `[==[...]==]`")
            }
            LexErrorKind::UnterminatedString { what: "string" } => {
                diag.with_note("quoted strings cannot span lines; end the line with `\\` to continue")
            }
            _ => diag,
        }
    }

    fn label(&self) -> &'static str {
        match self.kind {
            LexErrorKind::UnterminatedString { .. } => "missing closing delimiter",
            LexErrorKind::UnterminatedComment => "comment starts here",
            LexErrorKind::MalformedLongBracket => "not a long bracket",
            LexErrorKind::MalformedEscape { .. } => "invalid escape",
            LexErrorKind::MalformedNumber { .. } => "not a valid number",
            LexErrorKind::UnexpectedCharacter { .. } => "unexpected character",
        }
    }
}
