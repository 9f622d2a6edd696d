//! Source text plus the encoding checks done once before scanning.

use crate::Cursor;

#[derive(Clone, Copy, Debug)]
pub struct SourceBuffer<'a> {
    source: &'a str,
}

impl<'a> SourceBuffer<'a> {
    pub fn new(source: &'a str) -> Self {
        SourceBuffer { source }
    }

    /// Cursor positioned after any byte-order mark.
    pub fn cursor(&self) -> Cursor<'a> {
        let mut cursor = Cursor::new(self.source);
        cursor.advance_n(self.bom_len() as usize);
        cursor
    }

    pub fn as_str(&self) -> &'a str {
        self.source
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Length of a leading UTF-8 byte-order mark, `0` if there is none.
    pub fn bom_len(&self) -> u32 {
        if self.source.starts_with('\u{feff}') {
            3
        } else {
            0
        }
    }

    /// Offsets of NUL bytes inside the source.
    pub fn interior_nuls(&self) -> impl Iterator<Item = u32> + 'a {
        memchr::memchr_iter(0, self.source.as_bytes())
            .map(|offset| u32::try_from(offset).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests;
