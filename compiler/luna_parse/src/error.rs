//! Parse errors.
//!
//! A [`ParseError`] names what went wrong, where, what the parser wanted
//! and what it found. Errors are collected rather than returned early;
//! only [`ParseErrorKind::is_fatal`] kinds stop the parse.

mod context;

pub use context::ErrorContext;

use luna_diagnostic::{Diagnostic, ErrorCode, Suggestion};
use luna_ir::Span;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("expected an expression")]
    ExpectedExpression,
    #[error("unclosed `{delimiter}`")]
    UnclosedDelimiter {
        delimiter: &'static str,
        opened_at: Span,
    },
    #[error("expected an identifier")]
    ExpectedIdent,
    #[error("expected a type")]
    ExpectedType,
    #[error("trailing comma after `...`")]
    TrailingCommaAfterVarargs,
    #[error("duplicate `{modifier}` type for field `{field}`")]
    DuplicateModifier {
        field: String,
        modifier: &'static str,
    },
    #[error("a table type can have only one indexer")]
    DuplicateIndexer,
    #[error("duplicate attribute `@{name}`")]
    DuplicateAttribute { name: String },
    #[error("{feature} requires the `{flag}` feature")]
    FeatureDisabled {
        feature: &'static str,
        flag: &'static str,
    },
    #[error("{what} is not allowed in a declaration file")]
    NotAllowedInDeclarationFile { what: &'static str },
    #[error("`declare` is only allowed in declaration files")]
    DeclareOutsideDeclarationFile,
    #[error("`[[` after an indexed expression starts a long string")]
    AmbiguousLongBracket,
    #[error("invalid generic parameter list: {reason}")]
    InvalidGenericParams { reason: &'static str },
    #[error("cannot assign to this expression")]
    InvalidAssignmentTarget,
    #[error("nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: u32 },
    #[error("source is {len} bytes, over the limit of {limit}")]
    SourceTooLarge { len: usize, limit: usize },
}

impl ParseErrorKind {
    /// Fatal kinds abort the whole parse.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParseErrorKind::NestingTooDeep { .. } | ParseErrorKind::SourceTooLarge { .. }
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ParseErrorKind::UnexpectedToken => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression => ErrorCode::E1002,
            ParseErrorKind::UnclosedDelimiter { .. } => ErrorCode::E1003,
            ParseErrorKind::ExpectedIdent => ErrorCode::E1004,
            ParseErrorKind::ExpectedType => ErrorCode::E1005,
            ParseErrorKind::TrailingCommaAfterVarargs => ErrorCode::E1006,
            ParseErrorKind::DuplicateModifier { .. } | ParseErrorKind::DuplicateIndexer => {
                ErrorCode::E1007
            }
            ParseErrorKind::DuplicateAttribute { .. } => ErrorCode::E1008,
            ParseErrorKind::FeatureDisabled { .. } => ErrorCode::E1009,
            ParseErrorKind::NotAllowedInDeclarationFile { .. } => ErrorCode::E1010,
            ParseErrorKind::DeclareOutsideDeclarationFile => ErrorCode::E1011,
            ParseErrorKind::AmbiguousLongBracket => ErrorCode::E1012,
            ParseErrorKind::InvalidGenericParams { .. } => ErrorCode::E1013,
            ParseErrorKind::InvalidAssignmentTarget => ErrorCode::E1014,
            ParseErrorKind::NestingTooDeep { .. } => ErrorCode::E9001,
            ParseErrorKind::SourceTooLarge { .. } => ErrorCode::E9003,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.message())]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    /// What the parser would have accepted here.
    pub expected: Option<String>,
    /// The offending token, as source text.
    pub found: Option<String>,
    /// Construct being parsed when the error occurred.
    pub context: Option<ErrorContext>,
    /// Replacement text fixing the error, if one is known.
    pub fix: Option<(Span, String)>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError {
            kind,
            span,
            expected: None,
            found: None,
            context: None,
            fix: None,
        }
    }

    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    #[must_use]
    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    /// Record the enclosing construct unless a more specific one is set.
    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }

    #[must_use]
    pub fn with_fix(mut self, span: Span, replacement: impl Into<String>) -> Self {
        self.fix = Some((span, replacement.into()));
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }

    /// One-line message: the kind, then expected/found when known.
    pub fn message(&self) -> String {
        match (&self.kind, &self.expected, &self.found) {
            (ParseErrorKind::UnexpectedToken, Some(expected), Some(found)) => {
                format!("expected {expected}, found {found}")
            }
            (_, Some(expected), Some(found)) => {
                format!("{}: expected {expected}, found {found}", self.kind)
            }
            (_, None, Some(found)) => format!("{}, found {found}", self.kind),
            _ => self.kind.to_string(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match &self.expected {
            Some(expected) => format!("expected {expected}"),
            None => self.kind.to_string(),
        };
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.message())
            .with_label(self.span, label);
        if let ParseErrorKind::UnclosedDelimiter {
            delimiter,
            opened_at,
        } = &self.kind
        {
            diag = diag.with_secondary_label(*opened_at, format!("`{delimiter}` opened here"));
        }
        if let Some(context) = self.context {
            diag = diag.with_note(format!("while parsing {}", context.description()));
        }
        match &self.kind {
            ParseErrorKind::FeatureDisabled { flag, .. } => {
                diag = diag.with_note(format!("enable it with `--feature {flag}`"));
            }
            ParseErrorKind::AmbiguousLongBracket => {
                diag = diag.with_note(
                    "in this edition `[[` always opens a long string; \
                     separate the brackets to index with one",
                );
            }
            _ => {}
        }
        if let Some((span, replacement)) = &self.fix {
            let suggestion = match self.kind {
                ParseErrorKind::AmbiguousLongBracket => Suggestion::machine_applicable(
                    "insert a space between the brackets",
                    *span,
                    replacement.clone(),
                ),
                _ => Suggestion::maybe_incorrect("try this", *span, replacement.clone()),
            };
            diag = diag.with_suggestion(suggestion);
        }
        diag
    }
}
