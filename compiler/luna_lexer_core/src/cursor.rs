//! Byte cursor over source text.

/// Copyable byte position into the source.
///
/// Reads past the end of the source return a `0` sentinel. `0` bytes inside
/// the source are ordinary bytes; [`Cursor::is_eof`] compares positions.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    pos: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor { source, pos: 0 }
    }

    #[inline]
    pub fn current(&self) -> u8 {
        self.peek_at(0)
    }

    #[inline]
    pub fn peek(&self) -> u8 {
        self.peek_at(1)
    }

    #[inline]
    pub fn peek2(&self) -> u8 {
        self.peek_at(2)
    }

    #[inline]
    pub fn peek_at(&self, n: usize) -> u8 {
        self.source
            .as_bytes()
            .get(self.pos as usize + n)
            .copied()
            .unwrap_or(0)
    }

    /// Unscanned bytes.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        self.source
            .as_bytes()
            .get(self.pos as usize..)
            .unwrap_or(&[])
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: usize) {
        self.pos = self
            .pos
            .saturating_add(u32::try_from(n).unwrap_or(u32::MAX))
            .min(self.source_len());
    }

    /// Skip to the end of the source.
    #[inline]
    pub fn advance_to_end(&mut self) {
        self.pos = self.source_len();
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len()
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        u32::try_from(self.source.len()).unwrap_or(u32::MAX)
    }

    /// Advance while `pred` holds and the source is not exhausted.
    #[inline]
    pub fn eat_while(&mut self, mut pred: impl FnMut(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.advance();
        }
    }

    /// Consume `byte` if it is next.
    #[inline]
    pub fn eat(&mut self, byte: u8) -> bool {
        if !self.is_eof() && self.current() == byte {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        self.source.get(start as usize..end as usize).unwrap_or("")
    }

    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }
}
