//! Log sinks
//!
//! Sinks own their group-depth bookkeeping: the console guarantees balanced
//! `group`/`group_end` calls, the sink turns depth into indentation.

use super::{LogLevel, LogSink};

// ---------------------------------------------------------------------------
// BufferSink
// ---------------------------------------------------------------------------

/// Collects indented output lines in memory, for tests and capture.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Vec<String>,
    depth: usize,
}

impl BufferSink {
    /// Create an empty buffer sink
    pub fn new() -> Self {
        Self::default()
    }

    /// The captured lines, in emission order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The captured output as one newline-joined string
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Current open-group depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn push(&mut self, line: &str) {
        if line.is_empty() {
            self.lines.push(String::new());
            return;
        }
        let indent = "  ".repeat(self.depth);
        for part in line.split('\n') {
            self.lines.push(format!("{}{}", indent, part));
        }
    }
}

impl LogSink for BufferSink {
    fn write(&mut self, _level: LogLevel, line: &str) {
        self.push(line);
    }

    fn group(&mut self, label: &str) {
        self.push(label);
        self.depth += 1;
    }

    fn group_end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// StandardSink
// ---------------------------------------------------------------------------

/// Writes to stdout/stderr with group indentation and level prefixes
#[derive(Debug, Default)]
pub struct StandardSink {
    depth: usize,
}

impl StandardSink {
    /// Create a stdout/stderr sink
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }
}

impl LogSink for StandardSink {
    fn write(&mut self, level: LogLevel, line: &str) {
        let indent = self.indent();
        match level {
            LogLevel::Debug => println!("{}[DEBUG] {}", indent, line),
            LogLevel::Log => println!("{}{}", indent, line),
            LogLevel::Warn => eprintln!("{}[WARN] {}", indent, line),
            LogLevel::Error => eprintln!("{}[ERROR] {}", indent, line),
        }
    }

    fn group(&mut self, label: &str) {
        if !label.is_empty() {
            println!("{}▼ {}", self.indent(), label);
        }
        self.depth += 1;
    }

    fn group_end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// TracingSink
// ---------------------------------------------------------------------------

/// Forwards console output as `tracing` events at matching levels
#[derive(Debug, Default)]
pub struct TracingSink {
    depth: usize,
}

impl TracingSink {
    /// Create a tracing sink
    pub fn new() -> Self {
        Self::default()
    }

    fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }
}

impl LogSink for TracingSink {
    fn write(&mut self, level: LogLevel, line: &str) {
        let indent = self.indent();
        match level {
            LogLevel::Debug => tracing::debug!("{}{}", indent, line),
            LogLevel::Log => tracing::info!("{}{}", indent, line),
            LogLevel::Warn => tracing::warn!("{}{}", indent, line),
            LogLevel::Error => tracing::error!("{}{}", indent, line),
        }
    }

    fn group(&mut self, label: &str) {
        tracing::debug!("{}{}", self.indent(), label);
        self.depth += 1;
    }

    fn group_end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_sink_indents_groups() {
        let mut sink = BufferSink::new();
        sink.write(LogLevel::Log, "top");
        sink.group("Nested error");
        sink.write(LogLevel::Debug, "inner");
        sink.group_end();
        sink.write(LogLevel::Log, "after");
        assert_eq!(sink.lines(), ["top", "Nested error", "  inner", "after"]);
        assert_eq!(sink.depth(), 0);
    }

    #[test]
    fn buffer_sink_splits_multiline_writes() {
        let mut sink = BufferSink::new();
        sink.group("g");
        sink.write(LogLevel::Debug, "a\nb");
        assert_eq!(sink.lines(), ["g", "  a", "  b"]);
    }

    #[test]
    fn buffer_sink_keeps_empty_lines_unindented() {
        let mut sink = BufferSink::new();
        sink.group("g");
        sink.write(LogLevel::Debug, "");
        assert_eq!(sink.lines(), ["g", ""]);
    }

    #[test]
    fn group_end_never_underflows() {
        let mut sink = BufferSink::new();
        sink.group_end();
        assert_eq!(sink.depth(), 0);
    }
}
