//! Byte-level scanning of Luau source.
//!
//! [`RawScanner`] splits a [`SourceBuffer`] into [`RawToken`]s: a
//! [`RawTag`] plus a byte length. It knows nothing about keywords, escape
//! decoding or numeric values; the `luna_lexer` crate cooks raw tokens into
//! full tokens. Malformed input is reported through dedicated tags such as
//! [`RawTag::UnterminatedString`] so scanning never stops early.
//!
//! The two stateful pieces live here: long-bracket recognition (governed
//! by [`LongBracketMode`]) and the brace-depth stack that tracks where an
//! interpolated string's `{...}` splice ends.

mod cursor;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use raw_scanner::{LongBracketMode, RawScanner, ScanOptions};
pub use source_buffer::SourceBuffer;
pub use tag::{RawTag, RawToken};

/// Scan `source` to completion, excluding the final `Eof` token.
pub fn tokenize(source: &str, options: ScanOptions) -> Vec<RawToken> {
    let buffer = SourceBuffer::new(source);
    let mut scanner = RawScanner::new(buffer.cursor(), options);
    let mut out = Vec::new();
    loop {
        let token = scanner.next_token();
        if token.tag == RawTag::Eof {
            break;
        }
        out.push(token);
    }
    out
}

/// Level of a long bracket opening at the start of `bytes` (`[`, `=`*n,
/// `[`), or `None`.
pub fn long_bracket_level(bytes: &[u8]) -> Option<u16> {
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let equals = bytes[1..].iter().take_while(|&&b| b == b'=').count();
    if bytes.get(1 + equals) == Some(&b'[') {
        u16::try_from(equals).ok()
    } else {
        None
    }
}
