//! Raw token tags.

/// Kind of a raw token. Error conditions are tags, not `Err` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawTag {
    // ─── Trivia ────────────────────────────────────────────────
    Whitespace,
    LineComment,
    BlockComment,
    UnterminatedBlockComment,

    // ─── Atoms ─────────────────────────────────────────────────
    Ident,
    Number,
    String,
    UnterminatedString,
    LongString,
    UnterminatedLongString,
    /// `[=` not followed by `=`* and `[`.
    MalformedLongBracket,

    // ─── Interpolated strings ──────────────────────────────────
    /// `` `text` `` with no splices.
    InterpSimple,
    /// `` `text{ ``
    InterpBegin,
    /// `}text{`
    InterpMid,
    /// `` }text` ``
    InterpEnd,
    /// Interpolated string cut off by end of line or end of input.
    UnterminatedInterp,

    // ─── Punctuation ───────────────────────────────────────────
    Plus,
    Minus,
    Star,
    Slash,
    SlashSlash,
    Percent,
    Caret,
    Hash,
    DotDot,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    SlashSlashEq,
    PercentEq,
    CaretEq,
    DotDotEq,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    ColonColon,
    Comma,
    Dot,
    DotDotDot,
    Arrow,
    At,
    Pipe,
    Amp,
    Question,

    // ─── Errors and end ────────────────────────────────────────
    /// A byte (or whole UTF-8 character) that starts no token.
    InvalidByte,
    Eof,
}

impl RawTag {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            RawTag::Whitespace
                | RawTag::LineComment
                | RawTag::BlockComment
                | RawTag::UnterminatedBlockComment
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            RawTag::LineComment | RawTag::BlockComment | RawTag::UnterminatedBlockComment
        )
    }

    /// Whether a token with this tag can be the last token of an
    /// expression. Identifiers are refined by the scanner, which knows the
    /// reserved words.
    pub(crate) fn can_end_expression(self) -> bool {
        matches!(
            self,
            RawTag::Ident
                | RawTag::Number
                | RawTag::String
                | RawTag::LongString
                | RawTag::InterpSimple
                | RawTag::InterpEnd
                | RawTag::RParen
                | RawTag::RBracket
                | RawTag::RBrace
                | RawTag::DotDotDot
        )
    }
}

/// A tag plus the byte length of its lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}
