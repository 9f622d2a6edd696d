#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;

#[test]
fn bom_is_skipped_by_the_cursor() {
    let buffer = SourceBuffer::new("\u{feff}x");
    assert_eq!(buffer.bom_len(), 3);
    let cursor = buffer.cursor();
    assert_eq!(cursor.pos(), 3);
    assert_eq!(cursor.current(), b'x');
}

#[test]
fn finds_interior_nuls() {
    let buffer = SourceBuffer::new("a\0b\0");
    assert_eq!(buffer.interior_nuls().collect::<Vec<_>>(), vec![1, 3]);
}
