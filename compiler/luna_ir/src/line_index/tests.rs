#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;

#[test]
fn maps_offsets_to_lines() {
    let src = "local a\nlocal b\n\nreturn";
    let index = LineIndex::new(src);
    assert_eq!(index.line_count(), 4);
    assert_eq!(index.line_col(src, 0), LineCol { line: 1, column: 1 });
    assert_eq!(index.line_col(src, 6), LineCol { line: 1, column: 7 });
    assert_eq!(index.line_col(src, 8), LineCol { line: 2, column: 1 });
    assert_eq!(index.line_col(src, 16), LineCol { line: 3, column: 1 });
    assert_eq!(index.line_col(src, 17), LineCol { line: 4, column: 1 });
}

#[test]
fn columns_count_characters() {
    let src = "s = \"héllo\" x";
    let index = LineIndex::new(src);
    // `x` sits after a two-byte character.
    let x = u32::try_from(src.find('x').unwrap_or(0)).unwrap_or(0);
    assert_eq!(index.line_col(src, x).column, 13);
}

#[test]
fn line_text_strips_newline() {
    let src = "first\r\nsecond\n";
    let index = LineIndex::new(src);
    assert_eq!(index.line_text(src, Span::new(1, 2)), "first");
    assert_eq!(index.line_text(src, Span::new(8, 9)), "second");
}
