//! Process-wide logger and free-function entry points
//!
//! The global [`Logger`] is created on first use with its defaults: standard
//! error as the default stream, level INFO, flags `SHORT_FILE | FUNC_NAME`.
//! [`init_logger`] moves output to a file.

use crate::core::{
    CategoryLogger, DebugModule, LogConfig, LogFlags, LogLevel, Logger, Result, DEFAULT_CALL_DEPTH,
};
use std::path::Path;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger.
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::new)
}

/// Send default output to `path`, exiting the process if that fails.
pub fn init_logger<P: AsRef<Path>>(path: P, max_size_kb: u64) {
    global().init_file(path, max_size_kb);
}

/// # Errors
///
/// Returns error if the directory cannot be created or the file cannot be opened
pub fn try_init_logger<P: AsRef<Path>>(path: P, max_size_kb: u64) -> Result<()> {
    global().try_init_file(path, max_size_kb)
}

/// # Errors
///
/// Returns error if the configured log file cannot be set up
pub fn apply_config(config: &LogConfig, root: &Path) -> Result<()> {
    global().apply_config(config, root)
}

pub fn reload(config: &LogConfig) {
    global().reload(config);
}

pub fn set_level(level: LogLevel) {
    global().set_level(level);
}

pub fn level() -> LogLevel {
    global().level()
}

pub fn set_flags(flags: LogFlags) {
    global().set_flags(flags);
}

pub fn flags() -> LogFlags {
    global().flags()
}

pub fn add_debug_module(module: impl Into<DebugModule>) {
    global().add_debug_module(module);
}

pub fn clear_debug_modules() {
    global().clear_debug_modules();
}

pub fn set_current_debug_module(module: impl Into<DebugModule>) {
    global().set_current_debug_module(module);
}

pub fn clear_current_debug_module() {
    global().clear_current_debug_module();
}

pub fn get_logger(category: &str) -> Option<Arc<CategoryLogger>> {
    global().get_logger(category)
}

// Each wrapper below adds one frame between the caller and `Logger::*_c`.

#[inline(never)]
pub fn log_c(level: LogLevel, depth: usize, message: impl Into<String>) {
    global().log_c(level, depth + 1, message);
}

#[inline(never)]
pub fn debug_c(depth: usize, message: impl Into<String>) {
    global().debug_c(depth + 1, message);
}

#[inline(never)]
pub fn info_c(depth: usize, message: impl Into<String>) {
    global().info_c(depth + 1, message);
}

#[inline(never)]
pub fn warn_c(depth: usize, message: impl Into<String>) {
    global().warn_c(depth + 1, message);
}

#[inline(never)]
pub fn error_c(depth: usize, message: impl Into<String>) {
    global().error_c(depth + 1, message);
}

#[inline(never)]
pub fn fatal_c(depth: usize, message: impl Into<String>) {
    global().fatal_c(depth + 1, message);
}

#[inline(never)]
pub fn debug(message: impl Into<String>) {
    global().debug_c(DEFAULT_CALL_DEPTH + 1, message);
}

#[inline(never)]
pub fn info(message: impl Into<String>) {
    global().info_c(DEFAULT_CALL_DEPTH + 1, message);
}

#[inline(never)]
pub fn warn(message: impl Into<String>) {
    global().warn_c(DEFAULT_CALL_DEPTH + 1, message);
}

#[inline(never)]
pub fn error(message: impl Into<String>) {
    global().error_c(DEFAULT_CALL_DEPTH + 1, message);
}

#[inline(never)]
pub fn fatal(message: impl Into<String>) {
    global().fatal_c(DEFAULT_CALL_DEPTH + 1, message);
}
