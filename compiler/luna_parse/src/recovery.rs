//! Error recovery.
//!
//! Token sets are bitsets over [`TokenKind::discriminant_index`], so
//! membership is a single AND.

use luna_ir::{Name, TokenKind};

use crate::cursor::Cursor;

/// A set of token kinds, one bit per kind.
///
/// ```ignore
/// const CLOSERS: TokenSet = TokenSet::new()
///     .with(TokenKind::RParen)
///     .with(TokenKind::RBrace);
/// assert!(CLOSERS.contains(&TokenKind::RBrace));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline]
    #[allow(clippy::needless_pass_by_value)] // const fn builder for static initialization
    pub const fn single(kind: TokenKind) -> Self {
        Self(1u128 << kind.discriminant_index())
    }

    #[inline]
    #[must_use]
    #[allow(clippy::needless_pass_by_value)] // const fn builder for static initialization
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.discriminant_index()))
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: &TokenKind) -> bool {
        (self.0 & (1u128 << kind.discriminant_index())) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

/// Tokens that close a block. A block stops in front of them without
/// consuming.
pub const BLOCK_END: TokenSet = TokenSet::new()
    .with(TokenKind::End)
    .with(TokenKind::Else)
    .with(TokenKind::Elseif)
    .with(TokenKind::Until)
    .with(TokenKind::Eof);

/// Tokens that can only begin a statement, plus the block closers.
pub const STMT_BOUNDARY: TokenSet = TokenSet::new()
    .with(TokenKind::Local)
    .with(TokenKind::Function)
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::For)
    .with(TokenKind::Repeat)
    .with(TokenKind::Return)
    .with(TokenKind::Break)
    .with(TokenKind::Do)
    .with(TokenKind::At)
    .with(TokenKind::Semicolon)
    .union(BLOCK_END);

/// Tokens that begin an assignment or call statement. They are
/// boundaries only as the first token on a line, since they also appear
/// inside expressions.
pub const LINE_STMT_START: TokenSet = TokenSet::new()
    .with(TokenKind::Ident(Name::EMPTY))
    .with(TokenKind::LParen);

/// True when the cursor sits on a token that starts a line and could
/// start an assignment or call statement.
pub fn at_line_statement_start(cursor: &Cursor<'_>) -> bool {
    cursor.starts_line() && LINE_STMT_START.contains(cursor.current_kind())
}

/// Skip tokens until one in `recovery` is current. Stops at end of file
/// and reports whether a recovery token was found.
///
/// Contextual statement keywords (`type`, `export`, `declare`, `const`,
/// `continue`) are identifiers, so they cannot live in a [`TokenSet`];
/// `stop_at_ident` lets the caller treat them as boundaries too.
pub fn synchronize(
    cursor: &mut Cursor<'_>,
    recovery: TokenSet,
    mut stop_at_ident: impl FnMut(&Cursor<'_>) -> bool,
) -> bool {
    while !cursor.is_at_end() {
        if recovery.contains(cursor.current_kind()) || stop_at_ident(cursor) {
            return true;
        }
        cursor.advance();
    }
    recovery.contains(&TokenKind::Eof)
}
