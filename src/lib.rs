//! # Rust Clog
//!
//! Process-local leveled logging with per-category files and size-based
//! rotation.
//!
//! ## Features
//!
//! - **Filtering**: minimum severity plus per-module switches for debug output
//! - **Call sites**: `file:line` and function name resolved from the stack
//! - **Categories**: lazily opened secondary files, with errors copied to `error`
//! - **Rotation**: files past a size threshold are renamed and reopened in place
//! - **Thread Safe**: every entry point can be called from any thread
//!
//! ```no_run
//! use rust_clog::{info, error};
//!
//! rust_clog::init_logger("logs/app.log", 1024);
//! info!("service started on port {}", 8080);
//! error!("upstream unavailable");
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotatingFileWriter};
    pub use crate::core::{
        Appender, CategoryLogger, DebugModule, LogConfig, LogEntry, LogFlags, LogLevel, Logger,
        LoggerBuilder, LoggerError, Result, DEFAULT_CALL_DEPTH,
    };
}

pub use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotatingFileWriter};
pub use crate::core::{
    Appender, Callsite, CategoryLogger, DebugModule, LogConfig, LogEntry, LogFilter, LogFlags,
    LogLevel, Logger, LoggerBuilder, LoggerError, LoggerRegistry, Result, DEFAULT_CALL_DEPTH,
    ERROR_CATEGORY,
};
pub use crate::global::{
    add_debug_module, apply_config, clear_current_debug_module, clear_debug_modules, debug,
    debug_c, error, error_c, fatal, fatal_c, flags, get_logger, global, info, info_c, init_logger,
    level, log_c, reload, set_current_debug_module, set_flags, set_level, try_init_logger, warn,
    warn_c,
};
