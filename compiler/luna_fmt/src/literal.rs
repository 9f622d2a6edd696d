//! Literal rendering: strings, numbers and comments.
//!
//! Every rendering here lexes back to the value it was built from.

use std::fmt::Write;

use luna_ir::ast::NumberLit;

/// A double-quoted string literal holding `value`.
pub fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            _ => push_escaped(&mut out, c, false),
        }
    }
    out.push('"');
    out
}

/// One literal run of an interpolated string. Single-line strings escape
/// their line breaks; the bracketed multi-line form keeps them.
pub fn interp_segment(value: &str, multiline: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '`' => out.push_str("\\`"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            _ => push_escaped(&mut out, c, multiline),
        }
    }
    out
}

fn push_escaped(out: &mut String, c: char, keep_newlines: bool) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' if keep_newlines => out.push('\n'),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        // Three digits so a following digit is never read as part of it.
        c if c.is_ascii_control() => {
            let _ = write!(out, "\\{:03}", u32::from(c));
        }
        c => out.push(c),
    }
}

/// `[==[value]==]`. `level` is raised when `value` contains the closing
/// bracket of the requested level, and to at least one when `value`
/// starts with `[`, so that `[[[` never appears and the text lexes the
/// same under either long-bracket mode.
pub fn long_string(value: &str, level: u16) -> String {
    let min = if value.starts_with('[') {
        usize::from(level).max(1)
    } else {
        usize::from(level)
    };
    let level = free_level(value, min);
    let equals = "=".repeat(level);
    let mut out = String::with_capacity(value.len() + 2 * level + 5);
    out.push('[');
    out.push_str(&equals);
    out.push('[');
    // The lexer drops one line break right after the opener.
    if value.starts_with('\n') || value.starts_with('\r') {
        out.push('\n');
    }
    out.push_str(value);
    out.push(']');
    out.push_str(&equals);
    out.push(']');
    out
}

/// Smallest level from `min` whose closing bracket neither occurs in
/// `text` nor forms where `text` meets the closer.
pub(crate) fn free_level(text: &str, min: usize) -> usize {
    let mut level = min;
    loop {
        let equals = "=".repeat(level);
        let closer = format!("]{equals}]");
        let open_tail = format!("]{equals}");
        if !text.contains(&closer) && !text.ends_with(&open_tail) {
            return level;
        }
        level += 1;
    }
}

/// A number literal that lexes back to exactly `lit`.
pub fn number(lit: NumberLit) -> String {
    match lit {
        NumberLit::Integer(value) => format!("{value}i"),
        NumberLit::Float(value) if value.is_infinite() => "1e999".to_owned(),
        NumberLit::Float(value) if value.is_nan() => "(0 / 0)".to_owned(),
        NumberLit::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{value}")
        }
        // `Debug` is the shortest text that parses back to the same bits.
        NumberLit::Float(value) => format!("{value:?}"),
    }
}

/// Documentation as a comment. Single lines become `--- text`; text with
/// line breaks, or any doc that must share a line with code, becomes a
/// block comment.
pub fn doc_comment(text: &str, inline: bool) -> String {
    if !inline && !text.contains('\n') {
        return format!("--- {text}");
    }
    let equals = "=".repeat(free_level(text, 0));
    format!("--[{equals}[ {text} ]{equals}]")
}

#[cfg(test)]
mod tests;
