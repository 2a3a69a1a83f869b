use std::fmt::{Arguments, Write};

#[derive(Default)]
pub struct Buffer {
    pub buffer: String,
    pub tab: u8,
}

const TAB: &str = "    ";

// Writing into a `String` never fails, so the `fmt::Result`s below are
// dropped.
impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    pub fn write_fmt(&mut self, args: Arguments<'_>) {
        let _ = self.buffer.write_fmt(args);
    }

    pub fn push_tab(&mut self) {
        self.tab += 1;
    }

    pub fn pop_tab(&mut self) {
        if self.tab > 0 {
            self.tab -= 1;
        }
    }

    pub fn write_tab(&mut self) {
        for _ in 0 .. self.tab {
            self.write_str(TAB);
        }
    }

    pub fn write_eol(&mut self) {
        self.write_char('\n');
    }

    /// Drops the last `n` bytes, used to strip a trailing separator.
    pub fn pop(&mut self, n: usize) {
        let len = self.buffer.len().saturating_sub(n);
        self.buffer.truncate(len);
    }

    pub fn write_template(&mut self, template: Arguments<'_>) {
        for line in template.to_string().trim().lines() {
            self.write_tab();
            self.write_str(line);
            self.write_eol();
        }
        self.write_eol();
    }
}
