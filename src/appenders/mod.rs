//! Appender implementations

pub mod console;
pub mod rotating_file;

pub use console::ConsoleAppender;
pub use rotating_file::{
    RotatingFileAppender, RotatingFileWriter, DEFAULT_MAX_FILE_SIZE, MIN_MAX_FILE_SIZE,
    ROTATION_SUFFIX_FORMAT,
};

pub use crate::core::Appender;
