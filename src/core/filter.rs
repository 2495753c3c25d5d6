//! Severity and debug-module gates consulted by every log call

use super::{flags::LogFlags, log_level::LogLevel};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};

/// Tag selecting which subsystem's debug output is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DebugModule(pub i32);

impl DebugModule {
    pub const NONE: DebugModule = DebugModule(0);
    /// Reserved id; enabling it enables every module.
    pub const ALL: DebugModule = DebugModule(1);
}

impl From<i32> for DebugModule {
    fn from(id: i32) -> Self {
        DebugModule(id)
    }
}

impl fmt::Display for DebugModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct DebugModules {
    enabled: HashSet<DebugModule>,
    all_enabled: bool,
    current: DebugModule,
}

impl DebugModules {
    fn allows_current(&self) -> bool {
        self.all_enabled || self.enabled.contains(&self.current)
    }
}

impl Default for DebugModules {
    fn default() -> Self {
        Self {
            enabled: HashSet::from([DebugModule::ALL]),
            all_enabled: true,
            current: DebugModule::ALL,
        }
    }
}

/// Process-wide filter state: minimum level, option flags and debug modules.
///
/// Level and flags live in atomics so a log call never observes a torn value;
/// the module set sits behind a read-mostly lock.
#[derive(Debug)]
pub struct LogFilter {
    level: AtomicU8,
    flags: AtomicU32,
    modules: RwLock<DebugModules>,
}

impl LogFilter {
    pub fn new() -> Self {
        Self {
            level: AtomicU8::new(LogLevel::default() as u8),
            flags: AtomicU32::new(LogFlags::default().bits()),
            modules: RwLock::new(DebugModules::default()),
        }
    }

    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Release);
    }

    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub fn set_flags(&self, flags: LogFlags) {
        self.flags.store(flags.bits(), Ordering::Release);
    }

    pub fn flags(&self) -> LogFlags {
        LogFlags::from_bits_truncate(self.flags.load(Ordering::Acquire))
    }

    /// Enable debug output for `module`. Enabling [`DebugModule::ALL`] also
    /// turns on the all-modules switch.
    pub fn add_debug_module(&self, module: impl Into<DebugModule>) {
        let module = module.into();
        let mut modules = self.modules.write();
        modules.enabled.insert(module);
        if module == DebugModule::ALL {
            modules.all_enabled = true;
        }
    }

    pub fn clear_debug_modules(&self) {
        let mut modules = self.modules.write();
        modules.enabled.clear();
        modules.all_enabled = false;
    }

    pub fn set_current_debug_module(&self, module: impl Into<DebugModule>) {
        self.modules.write().current = module.into();
    }

    pub fn clear_current_debug_module(&self) {
        self.modules.write().current = DebugModule::NONE;
    }

    pub fn current_debug_module(&self) -> DebugModule {
        self.modules.read().current
    }

    /// Level gate only.
    #[inline]
    pub fn level_enabled(&self, level: LogLevel) -> bool {
        self.level() <= level
    }

    /// Full gate: level first, then the module filter for debug records.
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        if !self.level_enabled(level) {
            return false;
        }
        level != LogLevel::Debug || self.modules.read().allows_current()
    }
}

impl Default for LogFilter {
    fn default() -> Self {
        Self::new()
    }
}
