//! Operator-facing replay log
//!
//! The replay log is the line-by-line record an operator reviews before a
//! check-in. It is separate from `tracing` diagnostics, and each instance
//! remembers whether it has seen an error line.

/// Kind of change reported on a replay log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeMark {
    Add,
    Edit,
    Delete,
}

impl ChangeMark {
    /// Leading symbol of the log line: `+`, `~` or `-`.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Edit => '~',
            Self::Delete => '-',
        }
    }
}

/// Sink for replay log lines.
pub trait ReplayLog {
    fn info(&mut self, line: &str);

    /// A replayed change. Written as an info line `<symbol><path>` unless
    /// the sink renders changes itself.
    fn change(&mut self, mark: ChangeMark, path: &str) {
        self.info(&format!("{}{}", mark.symbol(), path));
    }

    fn error(&mut self, line: &str);

    /// True once any [`error`](Self::error) line has been written.
    fn had_errors(&self) -> bool;
}

/// Forwards replay lines to `tracing`.
#[derive(Debug, Default)]
pub struct TracingLog {
    errors: usize,
}

impl TracingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }
}

impl ReplayLog for TracingLog {
    fn info(&mut self, line: &str) {
        tracing::info!(target: "replay", "{}", line);
    }

    fn error(&mut self, line: &str) {
        self.errors += 1;
        tracing::error!(target: "replay", "{}", line);
    }

    fn had_errors(&self) -> bool {
        self.errors > 0
    }
}

/// A collected log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Info(String),
    Error(String),
}

impl LogLine {
    pub fn text(&self) -> &str {
        match self {
            Self::Info(s) | Self::Error(s) => s,
        }
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Vec<LogLine>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn infos(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                LogLine::Info(s) => Some(s.as_str()),
                LogLine::Error(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                LogLine::Error(s) => Some(s.as_str()),
                LogLine::Info(_) => None,
            })
            .collect()
    }
}

impl ReplayLog for MemoryLog {
    fn info(&mut self, line: &str) {
        self.lines.push(LogLine::Info(line.to_string()));
    }

    fn error(&mut self, line: &str) {
        self.lines.push(LogLine::Error(line.to_string()));
    }

    fn had_errors(&self) -> bool {
        self.lines.iter().any(|l| matches!(l, LogLine::Error(_)))
    }
}
