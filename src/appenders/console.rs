//! Console appender implementation

use crate::core::{Appender, LogEntry, Result};
use std::io::Write;

/// Writes records to standard error, the default stream before a log file
/// has been configured.
#[derive(Debug, Default)]
pub struct ConsoleAppender;

impl ConsoleAppender {
    pub fn new() -> Self {
        Self
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(entry.render().as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
