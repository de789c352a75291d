//! Leveled, timestamped diagnostics for the pipeline.
//!
//! The [`Logger`] is the sole observability channel: every component that
//! reports progress or anomalies takes a `&Logger` explicitly. There is no
//! process-wide logging state, so test harnesses can construct a
//! [`Logger::memory`] sink and assert on captured entries.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Severity of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Uppercase label used in the log line format.
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

/// A single log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// When the entry was recorded.
    pub timestamp: DateTime<Local>,
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Critical, message)
    }

    /// Render as a `timestamp - LEVEL - message` line.
    pub fn format_line(&self) -> String {
        format!(
            "{} - {} - {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.level.label(),
            self.message
        )
    }
}

enum Output {
    Writer(Box<dyn Write + Send>),
    Memory(Vec<LogEntry>),
}

/// Append-only diagnostics sink.
///
/// Constructed once per run and passed by reference to every component.
pub struct Logger {
    output: Mutex<Output>,
}

impl Logger {
    /// Log to a file, appending if it already exists.
    pub fn file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            output: Mutex::new(Output::Writer(Box::new(file))),
        })
    }

    /// Log to standard error.
    pub fn stderr() -> Self {
        Self {
            output: Mutex::new(Output::Writer(Box::new(std::io::stderr()))),
        }
    }

    /// Capture entries in memory (for tests).
    pub fn memory() -> Self {
        Self {
            output: Mutex::new(Output::Memory(Vec::new())),
        }
    }

    /// Record a log entry.
    ///
    /// A failing log write never aborts the pipeline.
    pub fn log(&self, entry: LogEntry) {
        let Ok(mut output) = self.output.lock() else {
            return;
        };
        match &mut *output {
            Output::Writer(w) => {
                let _ = writeln!(w, "{}", entry.format_line());
                let _ = w.flush();
            }
            Output::Memory(entries) => entries.push(entry),
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogEntry::info(message));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogEntry::warning(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogEntry::error(message));
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogEntry::critical(message));
    }

    /// Captured entries, for memory sinks. Writer sinks return an empty list.
    pub fn entries(&self) -> Vec<LogEntry> {
        match self.output.lock() {
            Ok(output) => match &*output {
                Output::Memory(entries) => entries.clone(),
                Output::Writer(_) => Vec::new(),
            },
            Err(_) => Vec::new(),
        }
    }

    /// Count of captured entries at the given level (memory sinks).
    pub fn count_at(&self, level: LogLevel) -> usize {
        self.entries().iter().filter(|e| e.level == level).count()
    }
}
