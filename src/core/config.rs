//! Values handed over by the configuration collaborator
//!
//! The collaborator reads its own file format and passes either a typed
//! [`LogConfig`] (any serde format) or the raw key/value pairs of its log
//! section to [`LogConfig::apply_section`].
//!
//! Level and flags are optional: a value that is missing or does not parse
//! stays `None`, and applying the config then keeps whatever the logger
//! already uses.

use super::{
    error::{LoggerError, Result},
    flags::LogFlags,
    log_level::LogLevel,
};
use crate::appenders::rotating_file::{DEFAULT_MAX_FILE_SIZE, MIN_MAX_FILE_SIZE};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

pub const KEY_LEVEL: &str = "log_level";
pub const KEY_FLAG: &str = "log_flag";
pub const KEY_FILE: &str = "log_file";
pub const KEY_MAX_SIZE: &str = "log_maxsize";

/// Name used when the configured log path names a directory.
const DIRECTORY_LOG_NAME: &str = "log";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    #[serde(deserialize_with = "de::level")]
    pub log_level: Option<LogLevel>,
    #[serde(deserialize_with = "de::flags")]
    pub log_flag: Option<LogFlags>,
    pub log_file: PathBuf,
    /// Maximum size of one file in kilobytes
    pub log_maxsize: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            log_flag: None,
            log_file: PathBuf::from("log.log"),
            log_maxsize: 0,
        }
    }
}

impl LogConfig {
    /// Build a config from a key/value section on top of the defaults.
    pub fn from_section(section: &HashMap<String, String>) -> Self {
        let mut config = Self::default();
        config.apply_section(section);
        config
    }

    /// Overwrite the values present in `section`. A value that does not
    /// parse leaves the current value in place.
    pub fn apply_section(&mut self, section: &HashMap<String, String>) {
        if let Some(level) = section.get(KEY_LEVEL).and_then(|v| parse_level(v).ok()) {
            self.log_level = Some(level);
        }
        if let Some(flags) = section.get(KEY_FLAG).and_then(|v| parse_flags(v).ok()) {
            self.log_flag = Some(flags);
        }
        if let Some(file) = section.get(KEY_FILE).filter(|v| !v.trim().is_empty()) {
            self.log_file = PathBuf::from(file.trim());
        }
        if let Some(size) = section.get(KEY_MAX_SIZE).and_then(|v| v.trim().parse::<u64>().ok()) {
            self.log_maxsize = size;
        }
    }

    /// Rotation threshold in bytes, with the 64 KiB floor applied.
    pub fn max_size_bytes(&self) -> u64 {
        clamp_max_size(self.log_maxsize)
    }

    /// Absolute log path: relative paths hang off `root`, and a path naming a
    /// directory gets the file name `log`.
    pub fn resolve_log_path(&self, root: &Path) -> PathBuf {
        let path = if self.log_file.is_absolute() {
            self.log_file.clone()
        } else {
            root.join(&self.log_file)
        };
        if names_directory(&self.log_file) {
            path.join(DIRECTORY_LOG_NAME)
        } else {
            path
        }
    }
}

/// Whether `path` is written as a directory: empty, without a final
/// component, or ending in a separator.
pub fn names_directory(path: &Path) -> bool {
    let raw = path.as_os_str();
    raw.is_empty()
        || path.file_name().is_none()
        || raw
            .to_str()
            .is_some_and(|s| s.ends_with('/') || s.ends_with(MAIN_SEPARATOR))
}

/// File the default stream writes to for `path`; directories get `log`.
pub fn log_file_path(path: &Path) -> PathBuf {
    if names_directory(path) {
        path.join(DIRECTORY_LOG_NAME)
    } else {
        path.to_path_buf()
    }
}

/// Kilobytes to bytes; anything under 64 KiB falls back to the 50 MiB default.
pub fn clamp_max_size(kilobytes: u64) -> u64 {
    let bytes = kilobytes.saturating_mul(1 << 10);
    if bytes < MIN_MAX_FILE_SIZE {
        DEFAULT_MAX_FILE_SIZE
    } else {
        bytes
    }
}

/// Integer 0..=4 or a level name.
///
/// # Errors
///
/// Returns `InvalidConfiguration` for anything else
pub fn parse_level(value: &str) -> Result<LogLevel> {
    let value = value.trim();
    let parsed = match value.parse::<i64>() {
        Ok(n) => LogLevel::try_from(n),
        Err(_) => value.parse(),
    };
    parsed.map_err(|e| LoggerError::config(KEY_LEVEL, e))
}

/// Non-negative integer bitmask; unknown bits are dropped.
///
/// # Errors
///
/// Returns `InvalidConfiguration` for non-numeric or negative values
pub fn parse_flags(value: &str) -> Result<LogFlags> {
    let value = value.trim();
    let number = value.parse::<i64>().map_err(|_| {
        LoggerError::config(KEY_FLAG, format!("expected an integer, got '{}'", value))
    })?;
    flags_from_number(number)
}

fn flags_from_number(number: i64) -> Result<LogFlags> {
    LogFlags::from_config_value(number)
        .ok_or_else(|| LoggerError::config(KEY_FLAG, format!("negative bitmask {}", number)))
}

mod de {
    use super::{flags_from_number, parse_flags, parse_level, LogFlags, LogLevel};
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(i64),
        Text(String),
    }

    pub fn level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<LogLevel>, D::Error> {
        let level = match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => parse_level(&n.to_string()),
            NumberOrText::Text(s) => parse_level(&s),
        };
        level.map(Some).map_err(D::Error::custom)
    }

    pub fn flags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<LogFlags>, D::Error> {
        let flags = match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => flags_from_number(n),
            NumberOrText::Text(s) => parse_flags(&s),
        };
        flags.map(Some).map_err(D::Error::custom)
    }
}
