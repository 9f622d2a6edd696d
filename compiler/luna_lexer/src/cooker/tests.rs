use pretty_assertions::assert_eq;

use super::*;

fn cook_all(source: &str) -> (Vec<TokenKind>, Vec<LexError>, StringInterner) {
    let interner = StringInterner::new();
    let kinds = {
        let mut cooker = TokenCooker::new(source, &interner);
        let mut kinds = Vec::new();
        let mut offset = 0;
        for raw in luna_lexer_core::tokenize(source, luna_lexer_core::ScanOptions::default()) {
            if let Some(kind) = cooker.cook(raw.tag, offset, raw.len) {
                kinds.push(kind);
            }
            offset += raw.len;
        }
        (kinds, cooker.into_errors())
    };
    (kinds.0, kinds.1, interner)
}

#[test]
fn numbers() {
    assert_eq!(decode_number("42"), Some(TokenKind::Number(42.0)));
    assert_eq!(decode_number("1_000.5"), Some(TokenKind::Number(1000.5)));
    assert_eq!(decode_number("0xff"), Some(TokenKind::Number(255.0)));
    assert_eq!(decode_number("0b1010"), Some(TokenKind::Number(10.0)));
    assert_eq!(decode_number("1e3"), Some(TokenKind::Number(1000.0)));
    assert_eq!(decode_number(".5"), Some(TokenKind::Number(0.5)));
    assert_eq!(decode_number("42i"), Some(TokenKind::Integer(42)));
    assert_eq!(decode_number("0x10i"), Some(TokenKind::Integer(16)));
}

#[test]
fn malformed_numbers() {
    for text in ["0x", "1..2", "12abc", "1.5i", "0b102", "1e", "99999999999999999999i"] {
        assert_eq!(decode_number(text), None, "{text}");
    }
}

#[test]
fn keywords_and_identifiers() {
    let (kinds, errors, interner) = cook_all("local type = nil");
    assert!(errors.is_empty());
    assert_eq!(
        kinds,
        vec![
            TokenKind::Local,
            TokenKind::Ident(interner.intern("type")),
            TokenKind::Eq,
            TokenKind::Nil,
        ]
    );
}

#[test]
fn strings_are_decoded() {
    let (kinds, errors, interner) = cook_all(r#""a\tb" [==[
raw\t]==]"#);
    assert!(errors.is_empty());
    assert_eq!(
        kinds,
        vec![
            TokenKind::String(interner.intern("a\tb")),
            TokenKind::LongString(interner.intern("raw\\t")),
        ]
    );
}

#[test]
fn interpolation_segments_drop_delimiters() {
    let (kinds, errors, interner) = cook_all("`x = {x}, y = {y}!`");
    assert!(errors.is_empty());
    let x = interner.intern("x");
    let y = interner.intern("y");
    assert_eq!(
        kinds,
        vec![
            TokenKind::InterpBegin(interner.intern("x = ")),
            TokenKind::Ident(x),
            TokenKind::InterpMid(interner.intern(", y = ")),
            TokenKind::Ident(y),
            TokenKind::InterpEnd(interner.intern("!")),
        ]
    );
}

#[test]
fn error_tags_record_errors() {
    let (kinds, errors, _) = cook_all("\"open\n$ [=x 0x");
    assert_eq!(
        errors.iter().map(LexError::code).collect::<Vec<_>>(),
        vec![
            luna_diagnostic::ErrorCode::E0001,
            luna_diagnostic::ErrorCode::E0002,
            luna_diagnostic::ErrorCode::E0006,
            luna_diagnostic::ErrorCode::E0003,
        ]
    );
    assert!(kinds.contains(&TokenKind::Error));
}
