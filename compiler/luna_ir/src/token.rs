//! Cooked tokens.

use crate::{Name, Span};

/// The kind of a token, with its decoded payload where it has one.
///
/// Contextual keywords (`type`, `export`, `continue`, `const`, `declare`,
/// `read`, `write`, `typeof`, ...) are lexed as [`TokenKind::Ident`]; the
/// parser decides from context whether they act as keywords.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Names and literals
    Ident(Name),
    Number(f64),
    /// Number written with the integer suffix, e.g. `42i`.
    Integer(i64),
    /// Quoted string; payload is the decoded contents.
    String(Name),
    /// `[[...]]` / `[==[...]==]` string; payload is the raw contents.
    LongString(Name),
    /// `` `text` `` with no interpolation.
    InterpSimple(Name),
    /// `` `text{ ``
    InterpBegin(Name),
    /// `}text{`
    InterpMid(Name),
    /// `` }text` ``
    InterpEnd(Name),

    // Reserved words
    And,
    Break,
    Do,
    Else,
    Elseif,
    End,
    False,
    For,
    Function,
    If,
    In,
    Local,
    Nil,
    Not,
    Or,
    Repeat,
    Return,
    Then,
    True,
    Until,
    While,

    // Operators and punctuation
    Plus,
    Minus,
    Star,
    Slash,
    SlashSlash,
    Percent,
    Caret,
    DotDot,
    Hash,
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

    /// A comment. Only produced by the streaming lexer; `lex()` moves
    /// comments into a separate [`CommentList`](crate::CommentList).
    Comment,
    /// Text that could not be lexed; a matching lex error was recorded.
    Error,
    Eof,
}

/// Coarse token classes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword,
    Identifier,
    Number,
    String,
    LongString,
    Symbol,
    Comment,
    Error,
    Eof,
}

impl TokenKind {
    /// Dense index of the variant, used by bitset token sets.
    pub const fn discriminant_index(&self) -> u8 {
        match self {
            TokenKind::Ident(_) => 0,
            TokenKind::Number(_) => 1,
            TokenKind::Integer(_) => 2,
            TokenKind::String(_) => 3,
            TokenKind::LongString(_) => 4,
            TokenKind::InterpSimple(_) => 5,
            TokenKind::InterpBegin(_) => 6,
            TokenKind::InterpMid(_) => 7,
            TokenKind::InterpEnd(_) => 8,
            TokenKind::And => 9,
            TokenKind::Break => 10,
            TokenKind::Do => 11,
            TokenKind::Else => 12,
            TokenKind::Elseif => 13,
            TokenKind::End => 14,
            TokenKind::False => 15,
            TokenKind::For => 16,
            TokenKind::Function => 17,
            TokenKind::If => 18,
            TokenKind::In => 19,
            TokenKind::Local => 20,
            TokenKind::Nil => 21,
            TokenKind::Not => 22,
            TokenKind::Or => 23,
            TokenKind::Repeat => 24,
            TokenKind::Return => 25,
            TokenKind::Then => 26,
            TokenKind::True => 27,
            TokenKind::Until => 28,
            TokenKind::While => 29,
            TokenKind::Plus => 30,
            TokenKind::Minus => 31,
            TokenKind::Star => 32,
            TokenKind::Slash => 33,
            TokenKind::SlashSlash => 34,
            TokenKind::Percent => 35,
            TokenKind::Caret => 36,
            TokenKind::DotDot => 37,
            TokenKind::Hash => 38,
            TokenKind::EqEq => 39,
            TokenKind::NotEq => 40,
            TokenKind::Lt => 41,
            TokenKind::LtEq => 42,
            TokenKind::Gt => 43,
            TokenKind::GtEq => 44,
            TokenKind::Eq => 45,
            TokenKind::PlusEq => 46,
            TokenKind::MinusEq => 47,
            TokenKind::StarEq => 48,
            TokenKind::SlashEq => 49,
            TokenKind::SlashSlashEq => 50,
            TokenKind::PercentEq => 51,
            TokenKind::CaretEq => 52,
            TokenKind::DotDotEq => 53,
            TokenKind::LParen => 54,
            TokenKind::RParen => 55,
            TokenKind::LBrace => 56,
            TokenKind::RBrace => 57,
            TokenKind::LBracket => 58,
            TokenKind::RBracket => 59,
            TokenKind::Semicolon => 60,
            TokenKind::Colon => 61,
            TokenKind::ColonColon => 62,
            TokenKind::Comma => 63,
            TokenKind::Dot => 64,
            TokenKind::DotDotDot => 65,
            TokenKind::Arrow => 66,
            TokenKind::At => 67,
            TokenKind::Pipe => 68,
            TokenKind::Amp => 69,
            TokenKind::Question => 70,
            TokenKind::Comment => 71,
            TokenKind::Error => 72,
            TokenKind::Eof => 73,
        }
    }

    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Ident(_) => TokenCategory::Identifier,
            TokenKind::Number(_) | TokenKind::Integer(_) => TokenCategory::Number,
            TokenKind::String(_)
            | TokenKind::InterpSimple(_)
            | TokenKind::InterpBegin(_)
            | TokenKind::InterpMid(_)
            | TokenKind::InterpEnd(_) => TokenCategory::String,
            TokenKind::LongString(_) => TokenCategory::LongString,
            TokenKind::Comment => TokenCategory::Comment,
            TokenKind::Error => TokenCategory::Error,
            TokenKind::Eof => TokenCategory::Eof,
            kind if kind.is_keyword() => TokenCategory::Keyword,
            _ => TokenCategory::Symbol,
        }
    }

    pub fn is_keyword(&self) -> bool {
        (9..=29).contains(&self.discriminant_index())
    }

    /// Name used in diagnostics when the exact lexeme is not at hand.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Ident(_) => "identifier",
            TokenKind::Number(_) | TokenKind::Integer(_) => "number",
            TokenKind::String(_) | TokenKind::LongString(_) => "string",
            TokenKind::InterpSimple(_)
            | TokenKind::InterpBegin(_)
            | TokenKind::InterpMid(_)
            | TokenKind::InterpEnd(_) => "interpolated string",
            TokenKind::And => "and",
            TokenKind::Break => "break",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Elseif => "elseif",
            TokenKind::End => "end",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::In => "in",
            TokenKind::Local => "local",
            TokenKind::Nil => "nil",
            TokenKind::Not => "not",
            TokenKind::Or => "or",
            TokenKind::Repeat => "repeat",
            TokenKind::Return => "return",
            TokenKind::Then => "then",
            TokenKind::True => "true",
            TokenKind::Until => "until",
            TokenKind::While => "while",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::SlashSlash => "//",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::DotDot => "..",
            TokenKind::Hash => "#",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "~=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::SlashSlashEq => "//=",
            TokenKind::PercentEq => "%=",
            TokenKind::CaretEq => "^=",
            TokenKind::DotDotEq => "..=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::ColonColon => "::",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::DotDotDot => "...",
            TokenKind::Arrow => "->",
            TokenKind::At => "@",
            TokenKind::Pipe => "|",
            TokenKind::Amp => "&",
            TokenKind::Question => "?",
            TokenKind::Comment => "comment",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
        }
    }
}

/// A token with its location. The lexeme is recovered by slicing the
/// source with [`Token::span`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line of the first byte.
    pub line: u32,
    /// 1-based character column of the first byte.
    pub column: u32,
}

impl Token {
    pub fn lexeme<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}

/// Token sequence produced by `lex()`, always terminated by
/// [`TokenKind::Eof`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.tokens.iter().map(|t| t.kind)
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// The 21 reserved words of Luau.
pub const RESERVED_WORDS: [&str; 21] = [
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Whether `text` can be written as a bare name: ASCII letters, digits and
/// `_`, not starting with a digit, and not a reserved word.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_WORDS.contains(&text)
}

#[cfg(test)]
mod tests;
