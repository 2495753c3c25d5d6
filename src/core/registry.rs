//! Lazily created per-category log destinations

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    log_entry::LogEntry,
};
use crate::appenders::rotating_file::{RotatingFileAppender, DEFAULT_MAX_FILE_SIZE};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Category that receives a copy of every error and fatal record.
pub const ERROR_CATEGORY: &str = "error";

/// Derive the file a category writes to from the base log path.
///
/// `error` replaces the base extension (`app.log` -> `app.error.log`);
/// any other category is appended (`app.log` -> `app.log.audit`).
pub fn category_path(base: &Path, category: &str) -> PathBuf {
    if category == ERROR_CATEGORY {
        base.with_extension("error.log")
    } else {
        let mut name = base.as_os_str().to_os_string();
        name.push(".");
        name.push(category);
        PathBuf::from(name)
    }
}

/// A named secondary destination. Lives as long as the registry that created it.
pub struct CategoryLogger {
    category: String,
    appender: RotatingFileAppender,
}

impl CategoryLogger {
    fn open(category: &str, path: &Path, max_size: u64) -> Result<Self> {
        Ok(Self {
            category: category.to_string(),
            appender: RotatingFileAppender::new(category, path, max_size)?,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn path(&self) -> &Path {
        self.appender.path()
    }

    pub fn rotation_count(&self) -> u64 {
        self.appender.writer().rotation_count()
    }

    pub fn log(&self, entry: &LogEntry) -> Result<()> {
        self.appender.append(entry)
    }
}

impl Appender for CategoryLogger {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        self.appender.append(entry)
    }

    fn flush(&self) -> Result<()> {
        self.appender.flush()
    }

    fn name(&self) -> &str {
        &self.category
    }
}

/// Map from category name to its open destination.
///
/// Lookup and creation of a category happen inside one critical section, so
/// two first requests for the same category open the file exactly once.
pub struct LoggerRegistry {
    base_path: RwLock<Option<PathBuf>>,
    max_size: AtomicU64,
    loggers: Mutex<HashMap<String, Arc<CategoryLogger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self {
            base_path: RwLock::new(None),
            max_size: AtomicU64::new(DEFAULT_MAX_FILE_SIZE),
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// Set the base path and rotation threshold used for categories created
    /// from now on. Existing categories keep their files.
    pub fn configure(&self, base_path: impl Into<PathBuf>, max_size: u64) {
        *self.base_path.write() = Some(base_path.into());
        self.max_size.store(max_size, Ordering::Release);
    }

    pub fn base_path(&self) -> Option<PathBuf> {
        self.base_path.read().clone()
    }

    /// Return the destination for `category`, opening its file on first use.
    ///
    /// # Errors
    ///
    /// `NotConfigured` before [`LoggerRegistry::configure`], or the open error
    /// of the category file. Failed categories are not cached.
    pub fn get_or_create(&self, category: &str) -> Result<Arc<CategoryLogger>> {
        let mut loggers = self.loggers.lock();
        if let Some(logger) = loggers.get(category) {
            return Ok(Arc::clone(logger));
        }

        let base = self
            .base_path()
            .ok_or_else(|| LoggerError::not_configured("base log path"))?;
        let path = category_path(&base, category);
        let logger = Arc::new(CategoryLogger::open(
            category,
            &path,
            self.max_size.load(Ordering::Acquire),
        )?);
        loggers.insert(category.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn flush(&self) -> Result<()> {
        let loggers: Vec<_> = self.loggers.lock().values().cloned().collect();
        for logger in loggers {
            logger.flush()?;
        }
        Ok(())
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
