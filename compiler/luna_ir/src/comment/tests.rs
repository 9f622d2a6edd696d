#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;

fn line(start: u32, end: u32) -> Comment {
    Comment {
        kind: CommentKind::Line,
        span: Span::new(start, end),
    }
}

#[test]
fn last_before_uses_end_offsets() {
    let mut list = CommentList::new();
    list.push(line(0, 5));
    list.push(line(6, 12));
    list.push(line(20, 30));
    assert_eq!(list.last_before(0), None);
    assert_eq!(list.last_before(5), Some(0));
    assert_eq!(list.last_before(13), Some(1));
    assert_eq!(list.last_before(100), Some(2));
}
