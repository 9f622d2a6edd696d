//! Comments collected alongside the token stream.

use crate::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `-- text` up to the end of the line.
    Line,
    /// `--[[ text ]]` or `--[==[ text ]==]`.
    Block,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Comment {
    pub kind: CommentKind,
    /// Covers the whole comment including the `--` marker.
    pub span: Span,
}

/// Comments of one file, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentList {
    comments: Vec<Comment>,
}

impl CommentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, comment: Comment) {
        debug_assert!(self
            .comments
            .last()
            .map_or(true, |last| last.span.end <= comment.span.start));
        self.comments.push(comment);
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.comments.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Comment> {
        self.comments.get(index)
    }

    /// Index of the last comment ending at or before `offset`.
    pub fn last_before(&self, offset: u32) -> Option<usize> {
        let count = self.comments.partition_point(|c| c.span.end <= offset);
        count.checked_sub(1)
    }
}

#[cfg(test)]
mod tests;
