//! Contextual keywords.
//!
//! Luau keeps `type`, `export`, `continue` and friends usable as ordinary
//! names, so the lexer produces identifiers and the parser compares
//! interned names.

use luna_ir::ast::Access;
use luna_ir::{Name, StringInterner, TokenKind};

use crate::cursor::Cursor;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Words {
    pub type_: Name,
    pub export: Name,
    pub continue_: Name,
    pub const_: Name,
    pub declare: Name,
    pub read: Name,
    pub write: Name,
    pub typeof_: Name,
    pub class: Name,
    pub extern_: Name,
    pub extends: Name,
    pub with: Name,
}

impl Words {
    pub fn new(interner: &StringInterner) -> Self {
        Words {
            type_: interner.intern("type"),
            export: interner.intern("export"),
            continue_: interner.intern("continue"),
            const_: interner.intern("const"),
            declare: interner.intern("declare"),
            read: interner.intern("read"),
            write: interner.intern("write"),
            typeof_: interner.intern("typeof"),
            class: interner.intern("class"),
            extern_: interner.intern("extern"),
            extends: interner.intern("extends"),
            with: interner.intern("with"),
        }
    }

    /// `type X`, `export type`, `declare x`, `const x`: a contextual word
    /// followed by something that only makes sense as a statement.
    pub fn starts_contextual_statement(&self, cursor: &Cursor<'_>) -> bool {
        let Some(word) = cursor.check_ident() else {
            return false;
        };
        let next_ident = cursor.next_is_ident();
        let keyword_then_name =
            (word == self.type_ || word == self.const_ || word == self.declare) && next_ident;
        let declare_function = word == self.declare && cursor.check_next(&TokenKind::Function);
        let export_type =
            word == self.export && matches!(cursor.peek_kind(1), TokenKind::Ident(n) if *n == self.type_);
        keyword_then_name || declare_function || export_type
    }

    /// `continue` is a statement unless the next token continues an
    /// expression that uses it as a name.
    pub fn is_continue_statement(&self, cursor: &Cursor<'_>) -> bool {
        cursor.check_word(self.continue_)
            && !matches!(
                cursor.peek_kind(1),
                TokenKind::LParen
                    | TokenKind::Dot
                    | TokenKind::LBracket
                    | TokenKind::Colon
                    | TokenKind::LBrace
                    | TokenKind::String(_)
                    | TokenKind::LongString(_)
                    | TokenKind::Eq
                    | TokenKind::Comma
                    | TokenKind::PlusEq
                    | TokenKind::MinusEq
                    | TokenKind::StarEq
                    | TokenKind::SlashEq
                    | TokenKind::SlashSlashEq
                    | TokenKind::PercentEq
                    | TokenKind::CaretEq
                    | TokenKind::DotDotEq
            )
    }

    /// `read`/`write` acting as a modifier: followed by a name or `[`.
    pub fn access_modifier(&self, cursor: &Cursor<'_>) -> Option<Access> {
        let word = cursor.check_ident()?;
        let modifier = if word == self.read {
            Access::Read
        } else if word == self.write {
            Access::Write
        } else {
            return None;
        };
        matches!(cursor.peek_kind(1), TokenKind::Ident(_) | TokenKind::LBracket).then_some(modifier)
    }
}
