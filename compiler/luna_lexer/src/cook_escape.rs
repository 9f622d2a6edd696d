//! Escape decoding for quoted and interpolated strings.
//!
//! Supported escapes: `\a \b \f \n \r \t \v \\ \" \'`, an escaped line
//! break, `\z` (skips following whitespace), `\xXX`, decimal `\ddd` up to
//! 255, and `\u{XXXX}`. Interpolated strings also accept `` \` ``, `\{`
//! and `\}`. Byte escapes above `0x7F` decode to the code point with the
//! same value.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::CharIndices;

use luna_ir::Span;

use crate::lex_error::{LexError, LexErrorKind};

type Chars<'s> = Peekable<CharIndices<'s>>;

/// Decode the escapes in `content`, the text between the delimiters.
///
/// `base` is the byte offset of `content` in the file. Malformed escapes
/// record an error and decode to the escaped character itself so the
/// literal still has a value.
pub(crate) fn unescape<'s>(
    content: &'s str,
    base: u32,
    interpolated: bool,
    errors: &mut Vec<LexError>,
) -> Cow<'s, str> {
    if !content.contains('\\') {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut chars = content.char_indices().peekable();
    let len = content.len();
    while let Some((start, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            errors.push(malformed(base, start, len, "`\\` at end of string"));
            break;
        };
        match esc {
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '\\' | '"' | '\'' => out.push(esc),
            '`' | '{' | '}' if interpolated => out.push(esc),
            '\n' => {
                out.push('\n');
                chars.next_if(|&(_, c)| c == '\r');
            }
            '\r' => {
                out.push('\n');
                chars.next_if(|&(_, c)| c == '\n');
            }
            'z' => while chars.next_if(|&(_, c)| c.is_ascii_whitespace()).is_some() {},
            'x' => match hex_digits(&mut chars, 2) {
                Some(value) => out.push(char::from(u8::try_from(value).unwrap_or(0))),
                None => {
                    let end = position(&mut chars, len);
                    errors.push(malformed(base, start, end, "`\\x` needs two hex digits"));
                }
            },
            '0'..='9' => {
                let mut value = esc.to_digit(10).unwrap_or(0);
                for _ in 0..2 {
                    match chars.next_if(|&(_, c)| c.is_ascii_digit()) {
                        Some((_, d)) => value = value * 10 + d.to_digit(10).unwrap_or(0),
                        None => break,
                    }
                }
                match u8::try_from(value) {
                    Ok(byte) => out.push(char::from(byte)),
                    Err(_) => {
                        let end = position(&mut chars, len);
                        errors.push(malformed(
                            base,
                            start,
                            end,
                            "decimal escape is larger than 255",
                        ));
                    }
                }
            }
            'u' => match unicode_escape(&mut chars) {
                Ok(c) => out.push(c),
                Err(reason) => {
                    let end = position(&mut chars, len);
                    errors.push(malformed(base, start, end, reason));
                }
            },
            other => {
                let end = position(&mut chars, len);
                errors.push(malformed(base, start, end, "unknown escape character"));
                out.push(other);
            }
        }
    }
    Cow::Owned(out)
}

/// Read exactly `count` hex digits.
fn hex_digits(chars: &mut Chars<'_>, count: usize) -> Option<u32> {
    let mut value = 0;
    for _ in 0..count {
        let (_, c) = chars.next_if(|&(_, c)| c.is_ascii_hexdigit())?;
        value = value * 16 + c.to_digit(16)?;
    }
    Some(value)
}

/// `{XXXX}` after `\u`.
fn unicode_escape(chars: &mut Chars<'_>) -> Result<char, &'static str> {
    if chars.next_if(|&(_, c)| c == '{').is_none() {
        return Err("`\\u` must be followed by `{`");
    }
    let mut value: u32 = 0;
    let mut digits = 0;
    while let Some((_, c)) = chars.next_if(|&(_, c)| c.is_ascii_hexdigit()) {
        value = value.saturating_mul(16).saturating_add(c.to_digit(16).unwrap_or(0));
        digits += 1;
    }
    if chars.next_if(|&(_, c)| c == '}').is_none() {
        return Err("`\\u{` is missing its closing `}`");
    }
    if digits == 0 {
        return Err("`\\u{}` needs at least one hex digit");
    }
    char::from_u32(value).ok_or("`\\u{...}` is not a valid code point")
}

fn position(chars: &mut Chars<'_>, len: usize) -> usize {
    chars.peek().map_or(len, |&(i, _)| i)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "offsets are bounded by the source length, which fits in u32"
)]
fn malformed(base: u32, start: usize, end: usize, reason: &'static str) -> LexError {
    LexError::new(
        LexErrorKind::MalformedEscape { reason },
        Span::new(base + start as u32, base + end as u32),
    )
}
