//! Reserved-word lookup.
//!
//! Only the 21 reserved words become keyword tokens. Contextual keywords
//! (`type`, `export`, `continue`, `const`, ...) stay identifiers.

use luna_ir::TokenKind;

/// Keyword token for `text`, or `None` for an ordinary identifier.
///
/// Reserved words are 2 to 8 bytes long, which rejects most identifiers
/// before any comparison.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    if !(2..=8).contains(&text.len()) {
        return None;
    }
    match text.len() {
        2 => match text {
            "do" => Some(TokenKind::Do),
            "if" => Some(TokenKind::If),
            "in" => Some(TokenKind::In),
            "or" => Some(TokenKind::Or),
            _ => None,
        },
        3 => match text {
            "and" => Some(TokenKind::And),
            "end" => Some(TokenKind::End),
            "for" => Some(TokenKind::For),
            "nil" => Some(TokenKind::Nil),
            "not" => Some(TokenKind::Not),
            _ => None,
        },
        4 => match text {
            "else" => Some(TokenKind::Else),
            "then" => Some(TokenKind::Then),
            "true" => Some(TokenKind::True),
            _ => None,
        },
        5 => match text {
            "break" => Some(TokenKind::Break),
            "false" => Some(TokenKind::False),
            "local" => Some(TokenKind::Local),
            "until" => Some(TokenKind::Until),
            "while" => Some(TokenKind::While),
            _ => None,
        },
        6 => match text {
            "elseif" => Some(TokenKind::Elseif),
            "repeat" => Some(TokenKind::Repeat),
            "return" => Some(TokenKind::Return),
            _ => None,
        },
        8 => match text {
            "function" => Some(TokenKind::Function),
            _ => None,
        },
        _ => None,
    }
}
