//! Output option flags

use bitflags::bitflags;

bitflags! {
    /// Independent options controlling record decoration and error handling.
    ///
    /// `LONG_FILE` wins over `SHORT_FILE` when both are set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LogFlags: u32 {
        /// Full source path and line of the call site
        const LONG_FILE = 1;
        /// Source file basename and line of the call site
        const SHORT_FILE = 1 << 1;
        /// Qualified name of the calling function
        const FUNC_NAME = 1 << 2;
        /// Terminate the process after an error-level record is written
        const ERROR_EXIT = 1 << 3;

        const FILE_MASK = Self::LONG_FILE.bits() | Self::SHORT_FILE.bits() | Self::FUNC_NAME.bits();
    }
}

impl Default for LogFlags {
    fn default() -> Self {
        LogFlags::SHORT_FILE | LogFlags::FUNC_NAME
    }
}

impl LogFlags {
    /// Whether any call-site decoration is requested.
    pub fn wants_callsite(&self) -> bool {
        self.intersects(LogFlags::FILE_MASK)
    }

    /// Interpret an integer bitmask from configuration. Unknown bits are dropped,
    /// negative values are rejected.
    pub fn from_config_value(value: i64) -> Option<Self> {
        u32::try_from(value).ok().map(LogFlags::from_bits_truncate)
    }
}
