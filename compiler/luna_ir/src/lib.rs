//! Shared data for the luna front-end: source spans, interned names,
//! tokens, comments and the owned syntax tree.

pub mod ast;
mod comment;
mod interner;
mod line_index;
mod name;
mod span;
mod token;

pub use comment::{Comment, CommentKind, CommentList};
pub use interner::{InternError, StringInterner};
pub use line_index::{LineCol, LineIndex};
pub use name::Name;
pub use span::{Span, SpanError};
pub use token::{is_identifier, Token, TokenCategory, TokenKind, TokenList, RESERVED_WORDS};
