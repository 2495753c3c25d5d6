//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A destination for rendered records.
///
/// Appenders are shared between threads and synchronize internally, so
/// `append` takes `&self`.
pub trait Appender: Send + Sync {
    fn append(&self, entry: &LogEntry) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
