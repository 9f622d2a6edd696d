//! Token cooking: raw `(RawTag, len)` pairs into [`TokenKind`]s.
//!
//! ```text
//! source -> RawScanner -> (RawTag, len) -> TokenCooker -> TokenKind
//! ```
//!
//! Punctuation maps one to one. Identifiers go through the keyword table
//! and the interner. Strings are unescaped and interned, numbers are
//! decoded, and every error tag records a [`LexError`].

use luna_ir::{Span, StringInterner, TokenKind};
use luna_lexer_core::{long_bracket_level, RawTag};

use crate::cook_escape::unescape;
use crate::keywords;
use crate::lex_error::{LexError, LexErrorKind};

pub(crate) struct TokenCooker<'src> {
    source: &'src str,
    interner: &'src StringInterner,
    errors: Vec<LexError>,
    /// Bracket level of each open interpolated string, so `}text]=]``
    /// can be told apart from `}text]]`` in a single-line string.
    interp_levels: Vec<Option<u16>>,
}

impl<'src> TokenCooker<'src> {
    pub(crate) fn new(source: &'src str, interner: &'src StringInterner) -> Self {
        TokenCooker {
            source,
            interner,
            errors: Vec::new(),
            interp_levels: Vec::new(),
        }
    }

    pub(crate) fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub(crate) fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    /// Cook one raw token. Whitespace cooks to `None`.
    pub(crate) fn cook(&mut self, tag: RawTag, offset: u32, len: u32) -> Option<TokenKind> {
        let span = Span::new(offset, offset + len);
        let kind = match tag {
            RawTag::Whitespace => return None,
            RawTag::LineComment | RawTag::BlockComment => TokenKind::Comment,
            RawTag::UnterminatedBlockComment => {
                self.error(LexErrorKind::UnterminatedComment, span);
                TokenKind::Comment
            }

            RawTag::Ident => {
                let text = self.text(span);
                keywords::lookup(text)
                    .unwrap_or_else(|| TokenKind::Ident(self.interner.intern(text)))
            }
            RawTag::Number => self.number(span),

            RawTag::String => self.quoted(span, true),
            RawTag::UnterminatedString => {
                self.error(LexErrorKind::UnterminatedString { what: "string" }, span);
                self.quoted(span, false)
            }
            RawTag::LongString => self.long_string(span, true),
            RawTag::UnterminatedLongString => {
                self.error(
                    LexErrorKind::UnterminatedString {
                        what: "long string",
                    },
                    span,
                );
                self.long_string(span, false)
            }
            RawTag::MalformedLongBracket => {
                self.error(LexErrorKind::MalformedLongBracket, span);
                TokenKind::Error
            }

            RawTag::InterpSimple => {
                let level = opening_level(self.text(span));
                TokenKind::InterpSimple(self.interp_segment(span, level, true, true))
            }
            RawTag::InterpBegin => {
                let level = opening_level(self.text(span));
                self.interp_levels.push(level);
                TokenKind::InterpBegin(self.interp_segment(span, level, true, false))
            }
            RawTag::InterpMid => {
                let level = self.interp_levels.last().copied().flatten();
                TokenKind::InterpMid(self.interp_segment(span, level, false, false))
            }
            RawTag::InterpEnd => {
                let level = self.interp_levels.pop().flatten();
                TokenKind::InterpEnd(self.interp_segment(span, level, false, true))
            }
            RawTag::UnterminatedInterp => {
                if self.text(span).starts_with('}') {
                    self.interp_levels.pop();
                }
                self.error(
                    LexErrorKind::UnterminatedString {
                        what: "interpolated string",
                    },
                    span,
                );
                TokenKind::Error
            }

            RawTag::Plus => TokenKind::Plus,
            RawTag::Minus => TokenKind::Minus,
            RawTag::Star => TokenKind::Star,
            RawTag::Slash => TokenKind::Slash,
            RawTag::SlashSlash => TokenKind::SlashSlash,
            RawTag::Percent => TokenKind::Percent,
            RawTag::Caret => TokenKind::Caret,
            RawTag::Hash => TokenKind::Hash,
            RawTag::DotDot => TokenKind::DotDot,
            RawTag::EqEq => TokenKind::EqEq,
            RawTag::NotEq => TokenKind::NotEq,
            RawTag::Lt => TokenKind::Lt,
            RawTag::LtEq => TokenKind::LtEq,
            RawTag::Gt => TokenKind::Gt,
            RawTag::GtEq => TokenKind::GtEq,
            RawTag::Eq => TokenKind::Eq,
            RawTag::PlusEq => TokenKind::PlusEq,
            RawTag::MinusEq => TokenKind::MinusEq,
            RawTag::StarEq => TokenKind::StarEq,
            RawTag::SlashEq => TokenKind::SlashEq,
            RawTag::SlashSlashEq => TokenKind::SlashSlashEq,
            RawTag::PercentEq => TokenKind::PercentEq,
            RawTag::CaretEq => TokenKind::CaretEq,
            RawTag::DotDotEq => TokenKind::DotDotEq,
            RawTag::LParen => TokenKind::LParen,
            RawTag::RParen => TokenKind::RParen,
            RawTag::LBrace => TokenKind::LBrace,
            RawTag::RBrace => TokenKind::RBrace,
            RawTag::LBracket => TokenKind::LBracket,
            RawTag::RBracket => TokenKind::RBracket,
            RawTag::Semicolon => TokenKind::Semicolon,
            RawTag::Colon => TokenKind::Colon,
            RawTag::ColonColon => TokenKind::ColonColon,
            RawTag::Comma => TokenKind::Comma,
            RawTag::Dot => TokenKind::Dot,
            RawTag::DotDotDot => TokenKind::DotDotDot,
            RawTag::Arrow => TokenKind::Arrow,
            RawTag::At => TokenKind::At,
            RawTag::Pipe => TokenKind::Pipe,
            RawTag::Amp => TokenKind::Amp,
            RawTag::Question => TokenKind::Question,

            RawTag::InvalidByte => {
                let found = self.text(span).chars().next().unwrap_or('\u{FFFD}');
                self.error(LexErrorKind::UnexpectedCharacter { found }, span);
                TokenKind::Error
            }
            RawTag::Eof => TokenKind::Eof,
        };
        Some(kind)
    }

    fn text(&self, span: Span) -> &'src str {
        span.text(self.source)
    }

    fn error(&mut self, kind: LexErrorKind, span: Span) {
        self.errors.push(LexError::new(kind, span));
    }

    // ─── Strings ───────────────────────────────────────────────

    fn quoted(&mut self, span: Span, terminated: bool) -> TokenKind {
        let text = self.text(span);
        let end = if terminated { text.len() - 1 } else { text.len() };
        let content = text.get(1..end).unwrap_or("");
        let value = unescape(content, span.start + 1, false, &mut self.errors);
        TokenKind::String(self.interner.intern(&value))
    }

    fn long_string(&mut self, span: Span, terminated: bool) -> TokenKind {
        let text = self.text(span);
        let level = long_bracket_level(text.as_bytes()).map_or(0, usize::from);
        let open = level + 2;
        let end = if terminated {
            text.len().saturating_sub(level + 2)
        } else {
            text.len()
        };
        let content = text.get(open..end.max(open)).unwrap_or("");
        TokenKind::LongString(self.interner.intern(skip_first_newline(content)))
    }

    /// Decode one segment of an interpolated string. `opening` segments
    /// start with a backtick (and bracket); the rest start with `}`.
    /// `closing` segments end with the closing delimiter; the rest end
    /// with `{`.
    fn interp_segment(
        &mut self,
        span: Span,
        level: Option<u16>,
        opening: bool,
        closing: bool,
    ) -> luna_ir::Name {
        let text = self.text(span);
        let bracket = level.map_or(0, |l| usize::from(l) + 2);
        let start = if opening { 1 + bracket } else { 1 };
        let end = if closing {
            text.len().saturating_sub(1 + bracket)
        } else {
            text.len().saturating_sub(1)
        };
        let content = text.get(start..end.max(start)).unwrap_or("");
        let content = if level.is_some() && opening {
            skip_first_newline(content)
        } else {
            content
        };
        let offset = span.start + u32::try_from(start).unwrap_or(0);
        let value = unescape(content, offset, true, &mut self.errors);
        self.interner.intern(&value)
    }

    // ─── Numbers ───────────────────────────────────────────────

    fn number(&mut self, span: Span) -> TokenKind {
        let text = self.text(span);
        match decode_number(text) {
            Some(kind) => kind,
            None => {
                self.error(
                    LexErrorKind::MalformedNumber {
                        text: text.to_owned(),
                    },
                    span,
                );
                TokenKind::Error
            }
        }
    }
}

/// Bracket level of an interpolated string opening with `` `[=[ ``.
fn opening_level(text: &str) -> Option<u16> {
    text.get(1..)
        .and_then(|rest| long_bracket_level(rest.as_bytes()))
}

fn skip_first_newline(content: &str) -> &str {
    for prefix in ["\r\n", "\n\r", "\n", "\r"] {
        if let Some(rest) = content.strip_prefix(prefix) {
            return rest;
        }
    }
    content
}

/// Decode a numeric literal: decimal (with fraction and exponent), `0x`
/// hex and `0b` binary, `_` separators anywhere after the first digit,
/// and the integer suffix `i`.
pub(crate) fn decode_number(text: &str) -> Option<TokenKind> {
    let (body, integer) = match text.strip_suffix('i') {
        Some(body) => (body, true),
        None => (text, false),
    };
    let radix_digits = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
        .map(|d| (d, 16))
        .or_else(|| {
            body.strip_prefix("0b")
                .or_else(|| body.strip_prefix("0B"))
                .map(|d| (d, 2))
        });

    if let Some((digits, radix)) = radix_digits {
        let digits: String = digits.chars().filter(|&c| c != '_').collect();
        if digits.is_empty() {
            return None;
        }
        let value = u64::from_str_radix(&digits, radix).ok()?;
        if integer {
            return i64::try_from(value).ok().map(TokenKind::Integer);
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "Luau numbers are doubles; large literals round"
        )]
        let float = value as f64;
        return Some(TokenKind::Number(float));
    }

    if body.starts_with('_') {
        return None;
    }
    let cleaned: String = body.chars().filter(|&c| c != '_').collect();
    if integer {
        if !cleaned.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        return cleaned.parse::<i64>().ok().map(TokenKind::Integer);
    }
    if !cleaned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    cleaned.parse::<f64>().ok().map(TokenKind::Number)
}

#[cfg(test)]
mod tests;
