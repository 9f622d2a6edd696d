//! Output sinks for the printer.

/// Destination of printed text.
pub trait Emitter {
    /// Emit a text fragment. Fragments never contain a line break except
    /// inside string literals and comments.
    fn emit(&mut self, text: &str);

    /// Emit `\n`.
    fn emit_newline(&mut self);

    /// Emit `level` indentation steps.
    fn emit_indent(&mut self, level: usize);

    fn emit_space(&mut self) {
        self.emit(" ");
    }
}

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// In-memory emitter.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// End non-empty output with exactly one newline.
    pub fn finish_lines(&mut self) {
        while self.buffer.ends_with('\n') || self.buffer.ends_with(' ') {
            self.buffer.pop();
        }
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
    }

    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level * INDENT_WIDTH {
            self.buffer.push(' ');
        }
    }

    fn emit_space(&mut self) {
        self.buffer.push(' ');
    }
}
