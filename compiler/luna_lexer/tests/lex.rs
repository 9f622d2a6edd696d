#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use luna_ir::{CommentKind, StringInterner, TokenKind};
use luna_lexer::{lex, LexErrorKind, Lexer, LongBracketMode, ScanOptions};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str, options: ScanOptions) -> (Vec<TokenKind>, StringInterner) {
    let interner = StringInterner::new();
    let out = lex(source, options, &interner);
    (out.tokens.kinds().collect(), interner)
}

#[test]
fn tokens_end_with_eof_and_comments_are_split_out() {
    let interner = StringInterner::new();
    let out = lex(
        "--- doc\nlocal x = 1 --[[ trailing ]]\n",
        ScanOptions::default(),
        &interner,
    );
    assert!(!out.has_errors());
    assert_eq!(out.tokens.len(), 5);
    assert_eq!(out.tokens.as_slice().last().map(|t| t.kind), Some(TokenKind::Eof));
    let comment_kinds: Vec<_> = out.comments.iter().map(|c| c.kind).collect();
    assert_eq!(comment_kinds, vec![CommentKind::Line, CommentKind::Block]);
}

#[test]
fn streaming_lexer_yields_comments() {
    let interner = StringInterner::new();
    let stream: Vec<_> = Lexer::new("a -- c\nb", ScanOptions::default(), &interner)
        .map(|t| t.kind)
        .collect();
    assert_eq!(stream.len(), 4);
    assert_eq!(stream[1], TokenKind::Comment);
    assert_eq!(stream[3], TokenKind::Eof);
}

#[test]
fn tokens_carry_line_and_column() {
    let interner = StringInterner::new();
    let out = lex("local a\n  return a", ScanOptions::default(), &interner);
    let ret = out.tokens.get(2).unwrap();
    assert_eq!(ret.kind, TokenKind::Return);
    assert_eq!((ret.line, ret.column), (2, 3));
}

#[test]
fn byte_order_mark_is_skipped() {
    let (kinds, _) = kinds("\u{feff}return", ScanOptions::default());
    assert_eq!(kinds, vec![TokenKind::Return, TokenKind::Eof]);
}

#[test]
fn long_bracket_modes_differ_only_after_expressions() {
    let legacy = kinds("foo[[[a]]]", ScanOptions::default());
    let (legacy_kinds, interner) = legacy;
    assert_eq!(
        legacy_kinds,
        vec![
            TokenKind::Ident(interner.intern("foo")),
            TokenKind::LongString(interner.intern("[a")),
            TokenKind::RBracket,
            TokenKind::Eof,
        ]
    );

    let options = ScanOptions {
        long_bracket_mode: LongBracketMode::IndexBracketWins,
        ..ScanOptions::default()
    };
    let (index_kinds, interner) = kinds("foo[[[a]]]", options);
    assert_eq!(
        index_kinds,
        vec![
            TokenKind::Ident(interner.intern("foo")),
            TokenKind::LBracket,
            TokenKind::LongString(interner.intern("a")),
            TokenKind::RBracket,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn errors_do_not_stop_lexing() {
    let interner = StringInterner::new();
    let out = lex("local s = \"oops\nlocal t = 1", ScanOptions::default(), &interner);
    assert_eq!(out.errors.len(), 1);
    assert!(matches!(
        out.errors[0].kind,
        LexErrorKind::UnterminatedString { .. }
    ));
    assert!(out
        .tokens
        .kinds()
        .any(|k| k == TokenKind::Number(1.0)));
}

proptest! {
    #[test]
    fn lexing_is_total(source in "\\PC{0,80}") {
        let interner = StringInterner::new();
        let out = lex(&source, ScanOptions::default(), &interner);
        prop_assert_eq!(out.tokens.as_slice().last().map(|t| t.kind), Some(TokenKind::Eof));
        let mut last_end = 0;
        for token in &out.tokens {
            prop_assert!(token.span.start >= last_end);
            prop_assert!(token.span.end as usize <= source.len());
            last_end = token.span.end;
        }
    }
}
