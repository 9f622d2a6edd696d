#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;

#[test]
fn discriminants_fit_a_u128_bitset() {
    assert!(TokenKind::Eof.discriminant_index() < 128);
    assert_eq!(TokenKind::Ident(Name::EMPTY).discriminant_index(), 0);
}

#[test]
fn categories() {
    assert_eq!(TokenKind::Local.category(), TokenCategory::Keyword);
    assert_eq!(TokenKind::While.category(), TokenCategory::Keyword);
    assert_eq!(TokenKind::Plus.category(), TokenCategory::Symbol);
    assert_eq!(TokenKind::Integer(3).category(), TokenCategory::Number);
    assert_eq!(
        TokenKind::LongString(Name::EMPTY).category(),
        TokenCategory::LongString
    );
    assert_eq!(TokenKind::Eof.category(), TokenCategory::Eof);
}

#[test]
fn identifiers() {
    assert!(is_identifier("x"));
    assert!(is_identifier("_private1"));
    assert!(is_identifier("type"));
    assert!(!is_identifier("end"));
    assert!(!is_identifier("1st"));
    assert!(!is_identifier("two words"));
    assert!(!is_identifier(""));
}
