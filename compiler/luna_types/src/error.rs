//! Errors raised while building types.

use luna_diagnostic::{Diagnostic, ErrorCode};
use luna_ir::Span;
use thiserror::Error;

/// A type that could not be built from its parts.
///
/// Carries display strings rather than handles so it can be rendered
/// without the interners that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TypeBuildError {
    #[error("property `{field}` is declared more than once")]
    DuplicateField { field: String },

    #[error("property `{field}` already has a `{modifier}` type")]
    DuplicateModifier {
        field: String,
        modifier: &'static str,
    },

    #[error("table type already has an indexer")]
    DuplicateIndexer,

    #[error("write type `{write}` of `{field}` is not a subtype of its read type `{read}`")]
    IncompatibleReadWrite {
        field: String,
        read: String,
        write: String,
    },

    #[error("`const` binding `{name}` has no initializer")]
    UninitializedConst { name: String },

    #[error("{reason}")]
    InvalidGeneric { reason: String },

    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    #[error("`{name}` expects {expected} type argument(s), found {found}")]
    WrongTypeArgCount {
        name: String,
        expected: usize,
        found: usize,
    },
}

impl TypeBuildError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TypeBuildError::DuplicateField { .. } | TypeBuildError::DuplicateIndexer => {
                ErrorCode::E2001
            }
            TypeBuildError::DuplicateModifier { .. } => ErrorCode::E2002,
            TypeBuildError::UninitializedConst { .. } => ErrorCode::E2003,
            TypeBuildError::InvalidGeneric { .. } => ErrorCode::E2004,
            TypeBuildError::UnknownType { .. } => ErrorCode::E2005,
            TypeBuildError::IncompatibleReadWrite { .. } => ErrorCode::E2006,
            TypeBuildError::WrongTypeArgCount { .. } => ErrorCode::E2007,
        }
    }

    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        let label = match self {
            TypeBuildError::DuplicateField { .. } | TypeBuildError::DuplicateIndexer => {
                "declared again here"
            }
            TypeBuildError::DuplicateModifier { .. } => "repeated modifier",
            TypeBuildError::UninitializedConst { .. } => "needs `= value`",
            TypeBuildError::UnknownType { .. } => "not found in this scope",
            TypeBuildError::IncompatibleReadWrite { .. } => "writes could not be read back",
            TypeBuildError::InvalidGeneric { .. } | TypeBuildError::WrongTypeArgCount { .. } => {
                "here"
            }
        };
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(span, label);
        match self {
            TypeBuildError::DuplicateModifier { .. } => diag.with_note(
                "a property takes at most one `read` and one `write` type",
            ),
            TypeBuildError::UninitializedConst { .. } => {
                diag.with_note("a constant cannot be assigned after its declaration")
            }
            _ => diag,
        }
    }
}

/// A subtype query ran out of steps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("type evaluation exceeded its budget of {limit} steps")]
pub struct BudgetExceeded {
    pub limit: u32,
}

impl BudgetExceeded {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::E9002
    }

    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_label(span, "while checking this")
            .with_note("the value was accepted without a full check")
    }
}
