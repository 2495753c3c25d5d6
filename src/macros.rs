//! Logging macros for ergonomic log message formatting.
//!
//! Every macro accepts `format!` syntax and comes in two forms: with a
//! leading logger expression, or without one to use the process-wide logger.
//! The recorded call site is the line the macro was invoked on.
//!
//! # Examples
//!
//! ```
//! use rust_clog::prelude::*;
//! use rust_clog::info;
//!
//! let logger = Logger::new();
//!
//! // Explicit logger
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Process-wide logger
//! info!("User {} logged in", 42);
//! ```

/// Log a message at a runtime-chosen level.
///
/// # Examples
///
/// ```
/// # use rust_clog::prelude::*;
/// # let logger = Logger::new();
/// use rust_clog::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(LogLevel::Warn, "Retry {} of {}", 2, 5);
/// ```
#[macro_export]
macro_rules! log {
    ($level:path, $fmt:literal $($rest:tt)*) => {
        $crate::global::log_c($level, $crate::DEFAULT_CALL_DEPTH, format!($fmt $($rest)*))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_c($level, $crate::DEFAULT_CALL_DEPTH, format!($($arg)+))
    };
}

/// Log a debug-level message. Subject to the debug-module filter.
///
/// # Examples
///
/// ```
/// # use rust_clog::prelude::*;
/// # let logger = Logger::new();
/// use rust_clog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::debug_c($crate::DEFAULT_CALL_DEPTH, format!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug_c($crate::DEFAULT_CALL_DEPTH, format!($($arg)+))
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_clog::prelude::*;
/// # let logger = Logger::new();
/// use rust_clog::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::info_c($crate::DEFAULT_CALL_DEPTH, format!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.info_c($crate::DEFAULT_CALL_DEPTH, format!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_clog::prelude::*;
/// # let logger = Logger::new();
/// use rust_clog::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::warn_c($crate::DEFAULT_CALL_DEPTH, format!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn_c($crate::DEFAULT_CALL_DEPTH, format!($($arg)+))
    };
}

/// Log an error-level message. Copied to the `error` category; ends the
/// process when `LogFlags::ERROR_EXIT` is set.
///
/// # Examples
///
/// ```
/// # use rust_clog::prelude::*;
/// # let logger = Logger::new();
/// use rust_clog::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::error_c($crate::DEFAULT_CALL_DEPTH, format!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.error_c($crate::DEFAULT_CALL_DEPTH, format!($($arg)+))
    };
}

/// Log a fatal-level message. Copied to the `error` category; does not end
/// the process.
///
/// # Examples
///
/// ```
/// # use rust_clog::prelude::*;
/// # let logger = Logger::new();
/// use rust_clog::fatal;
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($fmt:literal $($rest:tt)*) => {
        $crate::global::fatal_c($crate::DEFAULT_CALL_DEPTH, format!($fmt $($rest)*))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal_c($crate::DEFAULT_CALL_DEPTH, format!($($arg)+))
    };
}
