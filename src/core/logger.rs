//! Main logger implementation
//!
//! A [`Logger`] owns the filter state, the default output and the category
//! registry. Every entry point filters, formats and writes synchronously on
//! the calling thread.

use super::{
    appender::Appender,
    callsite::Callsite,
    config::{clamp_max_size, log_file_path, LogConfig},
    error::{LoggerError, Result},
    filter::{DebugModule, LogFilter},
    flags::LogFlags,
    log_entry::LogEntry,
    log_level::LogLevel,
    registry::{CategoryLogger, LoggerRegistry, ERROR_CATEGORY},
};
use crate::appenders::{ConsoleAppender, RotatingFileAppender};
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Depth at which a direct call to one of the `*_c` methods reports the
/// location of its own caller.
///
/// Frames between an entry point and [`Callsite::capture`] are fixed, so the
/// functions on that path are never inlined. A helper that wraps a `*_c`
/// method and wants its caller reported passes `DEFAULT_CALL_DEPTH + 1`.
pub const DEFAULT_CALL_DEPTH: usize = 2;

/// Exit status used when `ERROR_EXIT` fires or setup fails.
pub const EXIT_FAILURE: i32 = 1;

pub struct Logger {
    filter: LogFilter,
    output: RwLock<Arc<dyn Appender>>,
    registry: LoggerRegistry,
}

impl Logger {
    /// Logger writing to standard error, level INFO, default flags.
    #[must_use]
    pub fn new() -> Self {
        Self::with_appender(ConsoleAppender::new())
    }

    #[must_use]
    pub fn with_appender<A: Appender + 'static>(appender: A) -> Self {
        Self {
            filter: LogFilter::new(),
            output: RwLock::new(Arc::new(appender)),
            registry: LoggerRegistry::new(),
        }
    }

    /// Replace the default output stream.
    pub fn set_appender(&self, appender: Arc<dyn Appender>) {
        *self.output.write() = appender;
    }

    /// Point the default stream at `path` and use it as the base for
    /// category files.
    ///
    /// A path written as a directory (`logs/`) logs to the file `log` inside
    /// it. The parent directory is created if missing. `max_size_kb` is clamped
    /// as described in [`clamp_max_size`].
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or the file cannot
    /// be opened.
    pub fn try_init_file<P: AsRef<Path>>(&self, path: P, max_size_kb: u64) -> Result<()> {
        let path = log_file_path(path.as_ref());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let max_size = clamp_max_size(max_size_kb);
        let appender = RotatingFileAppender::new("default", &path, max_size)?;
        self.registry.configure(&path, max_size);
        self.set_appender(Arc::new(appender));
        Ok(())
    }

    /// [`Logger::try_init_file`], terminating the process on failure after
    /// reporting the error on the current default stream.
    pub fn init_file<P: AsRef<Path>>(&self, path: P, max_size_kb: u64) {
        if let Err(e) = self.try_init_file(path, max_size_kb) {
            self.write_default(&LogEntry::new(
                LogLevel::Fatal,
                format!("cannot initialize log file: {}", e),
            ));
            std::process::exit(EXIT_FAILURE);
        }
    }

    /// Startup configuration: open the configured file under `root`, then
    /// apply level and flags.
    ///
    /// # Errors
    ///
    /// Same as [`Logger::try_init_file`]; level and flags are left untouched
    /// on failure.
    pub fn apply_config(&self, config: &LogConfig, root: &Path) -> Result<()> {
        self.try_init_file(config.resolve_log_path(root), config.log_maxsize)?;
        self.reload(config);
        Ok(())
    }

    /// Refresh level and flags from the values `config` carries; a missing
    /// value keeps the current one. The file destination stays as it is.
    pub fn reload(&self, config: &LogConfig) {
        if let Some(level) = config.log_level {
            self.filter.set_level(level);
        }
        if let Some(flags) = config.log_flag {
            self.filter.set_flags(flags);
        }
    }

    pub fn filter(&self) -> &LogFilter {
        &self.filter
    }

    pub fn registry(&self) -> &LoggerRegistry {
        &self.registry
    }

    pub fn set_level(&self, level: LogLevel) {
        self.filter.set_level(level);
    }

    pub fn level(&self) -> LogLevel {
        self.filter.level()
    }

    pub fn set_flags(&self, flags: LogFlags) {
        self.filter.set_flags(flags);
    }

    pub fn flags(&self) -> LogFlags {
        self.filter.flags()
    }

    pub fn add_debug_module(&self, module: impl Into<DebugModule>) {
        self.filter.add_debug_module(module);
    }

    pub fn clear_debug_modules(&self) {
        self.filter.clear_debug_modules();
    }

    pub fn set_current_debug_module(&self, module: impl Into<DebugModule>) {
        self.filter.set_current_debug_module(module);
    }

    pub fn clear_current_debug_module(&self) {
        self.filter.clear_current_debug_module();
    }

    /// Destination for `category`, created on first use.
    ///
    /// Returns `None` when no base path is configured yet, or when the file
    /// cannot be opened; the latter is reported on the default stream.
    pub fn get_logger(&self, category: &str) -> Option<Arc<CategoryLogger>> {
        match self.registry.get_or_create(category) {
            Ok(logger) => Some(logger),
            Err(LoggerError::NotConfigured { .. }) => None,
            Err(e) => {
                self.write_default(&LogEntry::new(
                    LogLevel::Error,
                    format!("cannot open logger for category '{}': {}", category, e),
                ));
                None
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.output.read().flush()?;
        self.registry.flush()
    }

    fn write_default(&self, entry: &LogEntry) {
        let output = Arc::clone(&*self.output.read());
        if let Err(e) = output.append(entry) {
            eprintln!("[LOGGER ERROR] {} output failed: {}", output.name(), e);
        }
    }

    fn write_error_category(&self, entry: &LogEntry) {
        if let Some(logger) = self.get_logger(ERROR_CATEGORY) {
            if let Err(e) = logger.log(entry) {
                eprintln!("[LOGGER ERROR] {} output failed: {}", ERROR_CATEGORY, e);
            }
        }
    }

    /// Gate, format and route one record.
    ///
    /// Error records go to the `error` category first, then to the default
    /// stream, and end the process when `ERROR_EXIT` is set. Fatal records go
    /// to the default stream first, then to the `error` category, and never
    /// end the process.
    #[inline(never)]
    fn emit(&self, level: LogLevel, depth: usize, message: String) {
        if !self.filter.is_enabled(level) {
            return;
        }

        let flags = self.filter.flags();
        let mut entry = LogEntry::new(level, message);
        if flags.wants_callsite() {
            entry = entry.with_callsite(Callsite::capture(depth).render(flags));
        }

        match level {
            LogLevel::Error => {
                self.write_error_category(&entry);
                self.write_default(&entry);
                if flags.contains(LogFlags::ERROR_EXIT) {
                    let _ = self.flush();
                    std::process::exit(EXIT_FAILURE);
                }
            }
            LogLevel::Fatal => {
                self.write_default(&entry);
                self.write_error_category(&entry);
            }
            _ => self.write_default(&entry),
        }
    }

    #[inline(never)]
    pub fn log_c(&self, level: LogLevel, depth: usize, message: impl Into<String>) {
        self.emit(level, depth, message.into());
    }

    #[inline(never)]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_c(level, DEFAULT_CALL_DEPTH + 1, message);
    }

    #[inline(never)]
    pub fn debug_c(&self, depth: usize, message: impl Into<String>) {
        self.emit(LogLevel::Debug, depth, message.into());
    }

    #[inline(never)]
    pub fn info_c(&self, depth: usize, message: impl Into<String>) {
        self.emit(LogLevel::Info, depth, message.into());
    }

    #[inline(never)]
    pub fn warn_c(&self, depth: usize, message: impl Into<String>) {
        self.emit(LogLevel::Warn, depth, message.into());
    }

    #[inline(never)]
    pub fn error_c(&self, depth: usize, message: impl Into<String>) {
        self.emit(LogLevel::Error, depth, message.into());
    }

    #[inline(never)]
    pub fn fatal_c(&self, depth: usize, message: impl Into<String>) {
        self.emit(LogLevel::Fatal, depth, message.into());
    }

    #[inline(never)]
    pub fn debug(&self, message: impl Into<String>) {
        self.debug_c(DEFAULT_CALL_DEPTH + 1, message);
    }

    #[inline(never)]
    pub fn info(&self, message: impl Into<String>) {
        self.info_c(DEFAULT_CALL_DEPTH + 1, message);
    }

    #[inline(never)]
    pub fn warn(&self, message: impl Into<String>) {
        self.warn_c(DEFAULT_CALL_DEPTH + 1, message);
    }

    #[inline(never)]
    pub fn error(&self, message: impl Into<String>) {
        self.error_c(DEFAULT_CALL_DEPTH + 1, message);
    }

    #[inline(never)]
    pub fn fatal(&self, message: impl Into<String>) {
        self.fatal_c(DEFAULT_CALL_DEPTH + 1, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```no_run
/// use rust_clog::prelude::*;
///
/// let logger = Logger::builder()
///     .level(LogLevel::Debug)
///     .flags(LogFlags::SHORT_FILE)
///     .log_file("logs/app.log", 1024)
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    level: LogLevel,
    flags: LogFlags,
    appender: Option<Arc<dyn Appender>>,
    log_file: Option<(PathBuf, u64)>,
    debug_modules: Option<Vec<DebugModule>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: LogLevel::default(),
            flags: LogFlags::default(),
            appender: None,
            log_file: None,
            debug_modules: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flags(mut self, flags: LogFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Default output used instead of standard error. Ignored when a log
    /// file is configured.
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appender = Some(Arc::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_file(mut self, path: impl Into<PathBuf>, max_size_kb: u64) -> Self {
        self.log_file = Some((path.into(), max_size_kb));
        self
    }

    /// Restrict debug output to these modules; the all-modules switch is
    /// only set if [`DebugModule::ALL`] is among them.
    #[must_use = "builder methods return a new value"]
    pub fn debug_modules<I, M>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<DebugModule>,
    {
        self.debug_modules = Some(modules.into_iter().map(Into::into).collect());
        self
    }

    /// # Errors
    ///
    /// Returns error if the configured log file cannot be set up
    pub fn build(self) -> Result<Logger> {
        let logger = Logger::new();
        if let Some(appender) = self.appender {
            logger.set_appender(appender);
        }
        if let Some((path, max_size_kb)) = self.log_file {
            logger.try_init_file(path, max_size_kb)?;
        }
        logger.set_level(self.level);
        logger.set_flags(self.flags);
        if let Some(modules) = self.debug_modules {
            logger.clear_debug_modules();
            for module in modules {
                logger.add_debug_module(module);
            }
        }
        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
