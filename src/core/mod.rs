//! Core logger types and traits

pub mod appender;
pub mod callsite;
pub mod config;
pub mod error;
pub mod filter;
pub mod flags;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod registry;

pub use appender::Appender;
pub use callsite::Callsite;
pub use config::LogConfig;
pub use error::{LoggerError, Result};
pub use filter::{DebugModule, LogFilter};
pub use flags::LogFlags;
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_CALL_DEPTH, EXIT_FAILURE};
pub use registry::{category_path, CategoryLogger, LoggerRegistry, ERROR_CATEGORY};
