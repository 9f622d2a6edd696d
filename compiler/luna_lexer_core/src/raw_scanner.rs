//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! Dispatch is on the current byte. Each arm advances the cursor and
//! returns a [`RawToken`]. The scanner does not resolve keywords, decode
//! escapes or parse numbers; it only finds token boundaries. The two
//! pieces of state it carries are the interpolation stack and what the
//! previous significant token allows next, which decides `[[` under
//! [`LongBracketMode::IndexBracketWins`]. For the latter it also keeps the
//! stack of open delimiters, to know when a `[` may open a table key.

use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::long_bracket_level;
use crate::tag::{RawTag, RawToken};

/// How `[[` is read when it could open either a long string or an index
/// whose key is a long string (`t[[[k]]]`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LongBracketMode {
    /// `[[` always opens a long bracket.
    #[default]
    LongBracketWins,
    /// `[` followed by a long bracket opener is an index bracket after a
    /// token that can end an expression, and a key bracket at the start
    /// of a table-constructor field (after `{`, `,` or `;` directly inside
    /// braces).
    IndexBracketWins,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub long_bracket_mode: LongBracketMode,
    /// Accept `` `[==[ ... ]==]` `` interpolated strings spanning lines.
    pub multiline_interpolation: bool,
}

/// One open `{...}` splice inside an interpolated string.
#[derive(Clone, Copy, Debug)]
struct InterpFrame {
    /// Unmatched `{` seen inside the splice.
    brace_depth: u32,
    /// Bracket level of the enclosing string, `None` for the backtick form.
    level: Option<u16>,
}

pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    options: ScanOptions,
    interp: SmallVec<[InterpFrame; 4]>,
    /// Open delimiters, innermost last; `true` for `{`.
    delimiters: SmallVec<[bool; 8]>,
    prev_ends_expr: bool,
    /// The previous token was `{`, `,` or `;`.
    prev_starts_field: bool,
}

impl<'a> RawScanner<'a> {
    pub fn new(cursor: Cursor<'a>, options: ScanOptions) -> Self {
        RawScanner {
            cursor,
            options,
            interp: SmallVec::new(),
            delimiters: SmallVec::new(),
            prev_ends_expr: false,
            prev_starts_field: false,
        }
    }

    /// Byte offset of the next token.
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Number of interpolation splices currently open.
    pub fn interp_depth(&self) -> usize {
        self.interp.len()
    }

    /// Produce the next raw token. Returns `Eof` with `len == 0` once the
    /// source is exhausted, and keeps returning it.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        let token = self.scan(start);
        if !token.tag.is_trivia() {
            self.track_delimiter(token.tag);
            self.prev_ends_expr = token.tag.can_end_expression()
                && !(token.tag == RawTag::Ident
                    && is_reserved_word(self.cursor.slice_from(start)));
            self.prev_starts_field =
                matches!(token.tag, RawTag::LBrace | RawTag::Comma | RawTag::Semicolon);
        }
        token
    }

    fn track_delimiter(&mut self, tag: RawTag) {
        match tag {
            RawTag::LBrace => self.delimiters.push(true),
            RawTag::LParen | RawTag::LBracket | RawTag::InterpBegin => {
                self.delimiters.push(false);
            }
            RawTag::RBrace | RawTag::RParen | RawTag::RBracket | RawTag::InterpEnd => {
                self.delimiters.pop();
            }
            _ => {}
        }
    }

    /// A `[` here may open a table-constructor key.
    fn at_field_start(&self) -> bool {
        self.prev_starts_field && self.delimiters.last() == Some(&true)
    }

    fn scan(&mut self, start: u32) -> RawToken {
        if self.cursor.is_eof() {
            return RawToken {
                tag: RawTag::Eof,
                len: 0,
            };
        }
        match self.cursor.current() {
            b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C => {
                self.cursor.eat_while(is_whitespace);
                self.token(start, RawTag::Whitespace)
            }
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.cursor.eat_while(is_ident_continue);
                self.token(start, RawTag::Ident)
            }
            b'0'..=b'9' => self.number(start),
            b'"' | b'\'' => self.quoted(start),
            b'`' => self.interp_open(start),
            b'[' => self.left_bracket(start),
            b'-' => self.minus(start),
            b'+' => self.with_eq(start, RawTag::Plus, RawTag::PlusEq),
            b'*' => self.with_eq(start, RawTag::Star, RawTag::StarEq),
            b'%' => self.with_eq(start, RawTag::Percent, RawTag::PercentEq),
            b'^' => self.with_eq(start, RawTag::Caret, RawTag::CaretEq),
            b'=' => self.with_eq(start, RawTag::Eq, RawTag::EqEq),
            b'<' => self.with_eq(start, RawTag::Lt, RawTag::LtEq),
            b'>' => self.with_eq(start, RawTag::Gt, RawTag::GtEq),
            b'/' => self.slash(start),
            b'.' => self.dot(start),
            b'~' => {
                if self.cursor.peek() == b'=' {
                    self.cursor.advance_n(2);
                    self.token(start, RawTag::NotEq)
                } else {
                    self.single(start, RawTag::InvalidByte)
                }
            }
            b':' => {
                self.cursor.advance();
                let tag = if self.cursor.eat(b':') {
                    RawTag::ColonColon
                } else {
                    RawTag::Colon
                };
                self.token(start, tag)
            }
            b'{' => {
                if let Some(frame) = self.interp.last_mut() {
                    frame.brace_depth += 1;
                }
                self.single(start, RawTag::LBrace)
            }
            b'}' => self.right_brace(start),
            b'#' => self.single(start, RawTag::Hash),
            b'(' => self.single(start, RawTag::LParen),
            b')' => self.single(start, RawTag::RParen),
            b']' => self.single(start, RawTag::RBracket),
            b';' => self.single(start, RawTag::Semicolon),
            b',' => self.single(start, RawTag::Comma),
            b'@' => self.single(start, RawTag::At),
            b'|' => self.single(start, RawTag::Pipe),
            b'&' => self.single(start, RawTag::Amp),
            b'?' => self.single(start, RawTag::Question),
            lead => {
                self.cursor.advance_n(utf8_len(lead));
                self.token(start, RawTag::InvalidByte)
            }
        }
    }

    #[inline]
    fn token(&self, start: u32, tag: RawTag) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    fn single(&mut self, start: u32, tag: RawTag) -> RawToken {
        self.cursor.advance();
        self.token(start, tag)
    }

    /// `x` or `x=`.
    fn with_eq(&mut self, start: u32, plain: RawTag, eq: RawTag) -> RawToken {
        self.cursor.advance();
        let tag = if self.cursor.eat(b'=') { eq } else { plain };
        self.token(start, tag)
    }

    // ─── Operators ─────────────────────────────────────────────

    fn minus(&mut self, start: u32) -> RawToken {
        match self.cursor.peek() {
            b'-' => self.comment(start),
            b'=' => {
                self.cursor.advance_n(2);
                self.token(start, RawTag::MinusEq)
            }
            b'>' => {
                self.cursor.advance_n(2);
                self.token(start, RawTag::Arrow)
            }
            _ => self.single(start, RawTag::Minus),
        }
    }

    fn slash(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        if self.cursor.eat(b'/') {
            let tag = if self.cursor.eat(b'=') {
                RawTag::SlashSlashEq
            } else {
                RawTag::SlashSlash
            };
            return self.token(start, tag);
        }
        let tag = if self.cursor.eat(b'=') {
            RawTag::SlashEq
        } else {
            RawTag::Slash
        };
        self.token(start, tag)
    }

    fn dot(&mut self, start: u32) -> RawToken {
        if self.cursor.peek().is_ascii_digit() {
            return self.number(start);
        }
        self.cursor.advance();
        if !self.cursor.eat(b'.') {
            return self.token(start, RawTag::Dot);
        }
        let tag = if self.cursor.eat(b'.') {
            RawTag::DotDotDot
        } else if self.cursor.eat(b'=') {
            RawTag::DotDotEq
        } else {
            RawTag::DotDot
        };
        self.token(start, tag)
    }

    // ─── Comments ──────────────────────────────────────────────

    fn comment(&mut self, start: u32) -> RawToken {
        self.cursor.advance_n(2);
        if let Some(level) = long_bracket_level(self.cursor.rest()) {
            self.cursor.advance_n(usize::from(level) + 2);
            return match find_long_close(self.cursor.rest(), usize::from(level)) {
                Some(end) => {
                    self.cursor.advance_n(end);
                    self.token(start, RawTag::BlockComment)
                }
                None => {
                    self.cursor.advance_to_end();
                    self.token(start, RawTag::UnterminatedBlockComment)
                }
            };
        }
        match memchr::memchr2(b'\n', b'\r', self.cursor.rest()) {
            Some(n) => self.cursor.advance_n(n),
            None => self.cursor.advance_to_end(),
        }
        self.token(start, RawTag::LineComment)
    }

    // ─── Numbers ───────────────────────────────────────────────

    /// Finds the extent of a numeric literal. Validation happens when the
    /// token is cooked, so `0x`, `1..2` and `12abc` are single `Number`
    /// tokens here.
    fn number(&mut self, start: u32) -> RawToken {
        if self.cursor.current() == b'0' && matches!(self.cursor.peek(), b'x' | b'X' | b'b' | b'B')
        {
            self.cursor.advance_n(2);
            self.cursor.eat_while(is_ident_continue);
            return self.token(start, RawTag::Number);
        }
        self.cursor
            .eat_while(|b| b.is_ascii_digit() || b == b'.' || b == b'_');
        if matches!(self.cursor.current(), b'e' | b'E') {
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
        }
        self.cursor.eat_while(is_ident_continue);
        self.token(start, RawTag::Number)
    }

    // ─── Strings ───────────────────────────────────────────────

    fn quoted(&mut self, start: u32) -> RawToken {
        let quote = self.cursor.current();
        self.cursor.advance();
        loop {
            if self.cursor.is_eof() {
                return self.token(start, RawTag::UnterminatedString);
            }
            match self.cursor.current() {
                b'\\' => self.skip_escape(),
                b'\n' | b'\r' => return self.token(start, RawTag::UnterminatedString),
                b if b == quote => {
                    self.cursor.advance();
                    return self.token(start, RawTag::String);
                }
                _ => self.cursor.advance(),
            }
        }
    }

    /// Skip a backslash and the part of the escape that affects token
    /// boundaries: an escaped line break, or the whitespace run after `\z`.
    fn skip_escape(&mut self) {
        self.cursor.advance();
        match self.cursor.current() {
            b'\r' => {
                self.cursor.advance();
                self.cursor.eat(b'\n');
            }
            b'\n' => {
                self.cursor.advance();
                self.cursor.eat(b'\r');
            }
            b'z' => {
                self.cursor.advance();
                self.cursor.eat_while(is_whitespace);
            }
            _ if self.cursor.is_eof() => {}
            _ => self.cursor.advance(),
        }
    }

    fn left_bracket(&mut self, start: u32) -> RawToken {
        let rest = self.cursor.rest();
        match long_bracket_level(rest) {
            Some(_)
                if self.options.long_bracket_mode == LongBracketMode::IndexBracketWins
                    && (self.prev_ends_expr || self.at_field_start())
                    && long_bracket_level(&rest[1..]).is_some() =>
            {
                self.single(start, RawTag::LBracket)
            }
            Some(level) => self.long_string(start, level),
            None if self.cursor.peek() == b'=' => {
                self.cursor.advance();
                self.cursor.eat_while(|b| b == b'=');
                self.token(start, RawTag::MalformedLongBracket)
            }
            None => self.single(start, RawTag::LBracket),
        }
    }

    fn long_string(&mut self, start: u32, level: u16) -> RawToken {
        self.cursor.advance_n(usize::from(level) + 2);
        match find_long_close(self.cursor.rest(), usize::from(level)) {
            Some(end) => {
                self.cursor.advance_n(end);
                self.token(start, RawTag::LongString)
            }
            None => {
                self.cursor.advance_to_end();
                self.token(start, RawTag::UnterminatedLongString)
            }
        }
    }

    // ─── Interpolated strings ──────────────────────────────────

    fn interp_open(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        let level = if self.options.multiline_interpolation {
            long_bracket_level(self.cursor.rest())
        } else {
            None
        };
        if let Some(level) = level {
            self.cursor.advance_n(usize::from(level) + 2);
        }
        self.interp_body(start, level, true)
    }

    fn right_brace(&mut self, start: u32) -> RawToken {
        match self.interp.last_mut() {
            Some(frame) if frame.brace_depth == 0 => {
                let level = frame.level;
                self.interp.pop();
                self.cursor.advance();
                self.interp_body(start, level, false)
            }
            Some(frame) => {
                frame.brace_depth -= 1;
                self.single(start, RawTag::RBrace)
            }
            None => self.single(start, RawTag::RBrace),
        }
    }

    /// Scan string text up to a splice `{` or the closing delimiter.
    /// `opening` is true for the first segment (after the backtick).
    fn interp_body(&mut self, start: u32, level: Option<u16>, opening: bool) -> RawToken {
        loop {
            if self.cursor.is_eof() {
                return self.token(start, RawTag::UnterminatedInterp);
            }
            match self.cursor.current() {
                b'`' if level.is_none() => {
                    self.cursor.advance();
                    let tag = if opening {
                        RawTag::InterpSimple
                    } else {
                        RawTag::InterpEnd
                    };
                    return self.token(start, tag);
                }
                b']' if level.is_some_and(|l| closes_multiline(self.cursor.rest(), l)) => {
                    let level = usize::from(level.unwrap_or(0));
                    self.cursor.advance_n(level + 3);
                    let tag = if opening {
                        RawTag::InterpSimple
                    } else {
                        RawTag::InterpEnd
                    };
                    return self.token(start, tag);
                }
                b'{' => {
                    self.cursor.advance();
                    self.interp.push(InterpFrame {
                        brace_depth: 0,
                        level,
                    });
                    let tag = if opening {
                        RawTag::InterpBegin
                    } else {
                        RawTag::InterpMid
                    };
                    return self.token(start, tag);
                }
                b'\\' => self.skip_escape(),
                b'\n' | b'\r' if level.is_none() => {
                    return self.token(start, RawTag::UnterminatedInterp);
                }
                _ => self.cursor.advance(),
            }
        }
    }
}

/// Offset just past the `]=*]` closing a long bracket of `level`.
fn find_long_close(rest: &[u8], level: usize) -> Option<usize> {
    let mut from = 0;
    while let Some(i) = memchr::memchr(b']', &rest[from..]) {
        let at = from + i;
        let after = &rest[at + 1..];
        if after.len() > level && after[..level].iter().all(|&b| b == b'=') && after[level] == b']'
        {
            return Some(at + level + 2);
        }
        from = at + 1;
    }
    None
}

/// Whether `rest` starts with `]`, `=`*level, `]`, and a backtick.
fn closes_multiline(rest: &[u8], level: u16) -> bool {
    let level = usize::from(level);
    rest.len() >= level + 3
        && rest[0] == b']'
        && rest[1..=level].iter().all(|&b| b == b'=')
        && rest[level + 1] == b']'
        && rest[level + 2] == b'`'
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Reserved words that cannot end an expression.
fn is_reserved_word(text: &str) -> bool {
    matches!(
        text,
        "and"
            | "break"
            | "do"
            | "else"
            | "elseif"
            | "end"
            | "for"
            | "function"
            | "if"
            | "in"
            | "local"
            | "not"
            | "or"
            | "repeat"
            | "return"
            | "then"
            | "until"
            | "while"
    )
}

fn utf8_len(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

#[cfg(test)]
mod tests;
