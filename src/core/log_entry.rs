//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Local};

/// Layout of the timestamp that starts every record line.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
    /// Rendered call-site decoration; empty when no file/function flag is set.
    pub callsite: String,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so that one record always occupies one line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Local::now(),
            callsite: String::new(),
        }
    }

    pub fn with_callsite(mut self, callsite: impl Into<String>) -> Self {
        self.callsite = callsite.into();
        self
    }

    /// The record without timestamp: `<prefix><message> [<callsite>]`.
    pub fn body(&self) -> String {
        format!("{}{} [{}]", self.level.prefix(), self.message, self.callsite)
    }

    /// One complete line, newline included.
    pub fn render(&self) -> String {
        format!(
            "{} {}\n",
            self.timestamp.format(RECORD_TIMESTAMP_FORMAT),
            self.body()
        )
    }
}
