//! Indentation-aware text sink for emitted C# source

const INDENT: &str = "    ";

/// Accumulates lines of source text, tracking the current indentation level
#[derive(Debug, Default, Clone)]
pub struct SourceWriter {
    buffer: String,
    level: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer whose first line starts `level` indents deep
    pub fn with_indent(level: usize) -> Self {
        Self {
            buffer: String::new(),
            level,
        }
    }

    pub fn write_line(&mut self, line: &str) {
        if line.is_empty() {
            self.buffer.push('\n');
            return;
        }
        for _ in 0..self.level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    pub fn blank_line(&mut self) {
        self.write_line("");
    }

    pub fn increase_indent(&mut self) {
        self.level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Write `{` and indent the lines that follow
    pub fn open_block(&mut self) {
        self.write_line("{");
        self.increase_indent();
    }

    pub fn close_block(&mut self) {
        self.decrease_indent();
        self.write_line("}");
    }

    /// `#region` wrapper around everything written by `body`
    pub fn region<F: FnOnce(&mut Self)>(&mut self, name: &str, body: F) {
        self.write_line(&format!("#region {name}"));
        body(self);
        self.write_line("#endregion");
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

/// Quote `value` as a C# string literal
pub fn csharp_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for ch in value.chars() {
        match ch {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            _ => literal.push(ch),
        }
    }
    literal.push('"');
    literal
}
