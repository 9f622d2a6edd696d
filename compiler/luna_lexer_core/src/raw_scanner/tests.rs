#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::SourceBuffer;

fn scan_with(source: &str, options: ScanOptions) -> Vec<(RawTag, &str)> {
    let buf = SourceBuffer::new(source);
    let mut scanner = RawScanner::new(buf.cursor(), options);
    let mut out = Vec::new();
    let mut pos = 0usize;
    loop {
        let tok = scanner.next_token();
        if tok.tag == RawTag::Eof {
            break;
        }
        let end = pos + tok.len as usize;
        if !tok.tag.is_trivia() || tok.tag.is_comment() {
            out.push((tok.tag, &source[pos..end]));
        }
        pos = end;
    }
    out
}

fn scan(source: &str) -> Vec<(RawTag, &str)> {
    scan_with(source, ScanOptions::default())
}

fn tags(source: &str) -> Vec<RawTag> {
    scan(source).into_iter().map(|(tag, _)| tag).collect()
}

fn index_wins() -> ScanOptions {
    ScanOptions {
        long_bracket_mode: LongBracketMode::IndexBracketWins,
        ..ScanOptions::default()
    }
}

// ─── Basics ────────────────────────────────────────────────────

#[test]
fn punctuation_is_maximal_munch() {
    assert_eq!(
        tags("... .. . ..= // //= ~= == -> :: ->"),
        vec![
            RawTag::DotDotDot,
            RawTag::DotDot,
            RawTag::Dot,
            RawTag::DotDotEq,
            RawTag::SlashSlash,
            RawTag::SlashSlashEq,
            RawTag::NotEq,
            RawTag::EqEq,
            RawTag::Arrow,
            RawTag::ColonColon,
            RawTag::Arrow,
        ]
    );
}

#[test]
fn generic_instantiation_brackets_stay_single() {
    assert_eq!(
        tags("f<<T>>()"),
        vec![
            RawTag::Ident,
            RawTag::Lt,
            RawTag::Lt,
            RawTag::Ident,
            RawTag::Gt,
            RawTag::Gt,
            RawTag::LParen,
            RawTag::RParen,
        ]
    );
}

#[test]
fn numbers_take_suffixes_and_separators() {
    assert_eq!(
        scan("1_000 0xFF_FF 0b1010 3.5e-2 .5 42i 1..2"),
        vec![
            (RawTag::Number, "1_000"),
            (RawTag::Number, "0xFF_FF"),
            (RawTag::Number, "0b1010"),
            (RawTag::Number, "3.5e-2"),
            (RawTag::Number, ".5"),
            (RawTag::Number, "42i"),
            (RawTag::Number, "1..2"),
        ]
    );
}

#[test]
fn invalid_bytes_cover_whole_characters() {
    assert_eq!(
        scan("a ~ é !"),
        vec![
            (RawTag::Ident, "a"),
            (RawTag::InvalidByte, "~"),
            (RawTag::InvalidByte, "é"),
            (RawTag::InvalidByte, "!"),
        ]
    );
}

// ─── Strings and comments ──────────────────────────────────────

#[test]
fn quoted_strings_stop_at_newline() {
    assert_eq!(
        scan("\"abc\nx"),
        vec![(RawTag::UnterminatedString, "\"abc"), (RawTag::Ident, "x")]
    );
    assert_eq!(scan(r#"'it\'s'"#), vec![(RawTag::String, r"'it\'s'")]);
}

#[test]
fn escaped_newline_and_z_continue_the_string() {
    assert_eq!(scan("\"a\\\nb\""), vec![(RawTag::String, "\"a\\\nb\"")]);
    assert_eq!(
        scan("\"a\\z\n   b\""),
        vec![(RawTag::String, "\"a\\z\n   b\"")]
    );
}

#[test]
fn long_strings_match_their_level() {
    assert_eq!(
        scan("[==[ a ]] ]=] ]==] x"),
        vec![(RawTag::LongString, "[==[ a ]] ]=] ]==]"), (RawTag::Ident, "x")]
    );
    assert_eq!(
        scan("[[ never closed"),
        vec![(RawTag::UnterminatedLongString, "[[ never closed")]
    );
    assert_eq!(
        scan("[=x"),
        vec![(RawTag::MalformedLongBracket, "[="), (RawTag::Ident, "x")]
    );
}

#[test]
fn comments() {
    assert_eq!(
        scan("-- line\n--[[ block\n ]] x --[=[ open"),
        vec![
            (RawTag::LineComment, "-- line"),
            (RawTag::BlockComment, "--[[ block\n ]]"),
            (RawTag::Ident, "x"),
            (RawTag::UnterminatedBlockComment, "--[=[ open"),
        ]
    );
}

// ─── Long-bracket ambiguity ────────────────────────────────────

#[test]
fn legacy_mode_reads_long_bracket_first() {
    assert_eq!(
        scan("foo[[[a]]]"),
        vec![
            (RawTag::Ident, "foo"),
            (RawTag::LongString, "[[[a]]"),
            (RawTag::RBracket, "]"),
        ]
    );
}

#[test]
fn index_mode_reads_index_after_expression() {
    assert_eq!(
        scan_with("foo[[[a]]]", index_wins()),
        vec![
            (RawTag::Ident, "foo"),
            (RawTag::LBracket, "["),
            (RawTag::LongString, "[[a]]"),
            (RawTag::RBracket, "]"),
        ]
    );
}

#[test]
fn index_mode_keeps_long_string_in_value_position() {
    assert_eq!(
        scan_with("return [[[a]]]", index_wins()),
        vec![
            (RawTag::Ident, "return"),
            (RawTag::LongString, "[[[a]]"),
            (RawTag::RBracket, "]"),
        ]
    );
    assert_eq!(
        scan_with("f [[x]]", index_wins()),
        vec![(RawTag::Ident, "f"), (RawTag::LongString, "[[x]]")]
    );
}

#[test]
fn index_mode_reads_key_bracket_at_field_start() {
    assert_eq!(
        scan_with("{[[[a]]]=1, [[[b]]]=2}", index_wins()),
        vec![
            (RawTag::LBrace, "{"),
            (RawTag::LBracket, "["),
            (RawTag::LongString, "[[a]]"),
            (RawTag::RBracket, "]"),
            (RawTag::Eq, "="),
            (RawTag::Number, "1"),
            (RawTag::Comma, ","),
            (RawTag::LBracket, "["),
            (RawTag::LongString, "[[b]]"),
            (RawTag::RBracket, "]"),
            (RawTag::Eq, "="),
            (RawTag::Number, "2"),
            (RawTag::RBrace, "}"),
        ]
    );
    assert_eq!(
        scan("{[[[a]]]=1}")[1],
        (RawTag::LongString, "[[[a]]")
    );
}

#[test]
fn index_mode_keeps_long_string_after_comma_outside_braces() {
    assert_eq!(
        scan_with("f(a, [[[x]])", index_wins()),
        vec![
            (RawTag::Ident, "f"),
            (RawTag::LParen, "("),
            (RawTag::Ident, "a"),
            (RawTag::Comma, ","),
            (RawTag::LongString, "[[[x]]"),
            (RawTag::RParen, ")"),
        ]
    );
    // Braces of an interpolation splice are not a table.
    let tokens = scan_with("x = `{[[[y]]}`", index_wins());
    assert_eq!(tokens[3], (RawTag::LongString, "[[[y]]"));
}

// ─── Interpolation ─────────────────────────────────────────────

#[test]
fn interpolation_segments() {
    assert_eq!(
        scan("`a{x}b{ {y} }c`"),
        vec![
            (RawTag::InterpBegin, "`a{"),
            (RawTag::Ident, "x"),
            (RawTag::InterpMid, "}b{"),
            (RawTag::LBrace, "{"),
            (RawTag::Ident, "y"),
            (RawTag::RBrace, "}"),
            (RawTag::InterpEnd, "}c`"),
        ]
    );
    assert_eq!(scan("`plain`"), vec![(RawTag::InterpSimple, "`plain`")]);
}

#[test]
fn nested_interpolation_unwinds_the_stack() {
    let buf = SourceBuffer::new("`a{`b{c}`}d`");
    let mut scanner = RawScanner::new(buf.cursor(), ScanOptions::default());
    let mut seen = Vec::new();
    loop {
        let tok = scanner.next_token();
        if tok.tag == RawTag::Eof {
            break;
        }
        seen.push(tok.tag);
    }
    assert_eq!(
        seen,
        vec![
            RawTag::InterpBegin,
            RawTag::InterpBegin,
            RawTag::Ident,
            RawTag::InterpEnd,
            RawTag::InterpEnd,
        ]
    );
    assert_eq!(scanner.interp_depth(), 0);
}

#[test]
fn single_line_interpolation_rejects_newline() {
    assert_eq!(
        scan("`abc\nx"),
        vec![(RawTag::UnterminatedInterp, "`abc"), (RawTag::Ident, "x")]
    );
}

#[test]
fn multiline_interpolation_needs_the_option() {
    let options = ScanOptions {
        multiline_interpolation: true,
        ..ScanOptions::default()
    };
    assert_eq!(
        scan_with("`[=[a\n{x}b]=]`", options),
        vec![
            (RawTag::InterpBegin, "`[=[a\n{"),
            (RawTag::Ident, "x"),
            (RawTag::InterpEnd, "}b]=]`"),
        ]
    );
    assert_eq!(
        scan("`[[a]]`"),
        vec![(RawTag::InterpSimple, "`[[a]]`")]
    );
}

// ─── Totality ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn lengths_cover_the_source(source in "\\PC{0,64}") {
        for options in [ScanOptions::default(), index_wins()] {
            let buf = SourceBuffer::new(&source);
            let mut scanner = RawScanner::new(buf.cursor(), options);
            let mut total = 0u32;
            loop {
                let tok = scanner.next_token();
                if tok.tag == RawTag::Eof {
                    break;
                }
                prop_assert!(tok.len > 0);
                total += tok.len;
            }
            prop_assert_eq!(total as usize, source.len());
        }
    }

    #[test]
    fn luau_shaped_input_never_stalls(source in "[a-z\\[\\]=`{}\"' \\n\\-]{0,48}") {
        let tokens = crate::tokenize(&source, ScanOptions::default());
        let total: u32 = tokens.iter().map(|t| t.len).sum();
        prop_assert_eq!(total as usize, source.len());
    }
}
