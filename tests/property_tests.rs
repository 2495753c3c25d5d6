//! Property-based tests for rust_clog using proptest

use parking_lot::Mutex;
use proptest::prelude::*;
use rust_clog::prelude::*;
use rust_clog::LogFilter;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

#[derive(Clone, Default)]
struct Counter(Arc<Mutex<usize>>);

impl Appender for Counter {
    fn append(&self, _entry: &LogEntry) -> Result<()> {
        *self.0.lock() += 1;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "counter"
    }
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// String and integer conversions agree with the enum
    #[test]
    fn test_log_level_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(LogLevel::try_from(level as i64), Ok(level));
        prop_assert_eq!(format!("{}", level), level.to_str());
    }

    /// Only 0..=4 are valid numeric levels
    #[test]
    fn test_numeric_level_range(value in -100i64..100) {
        prop_assert_eq!(LogLevel::try_from(value).is_ok(), (0..=4).contains(&value));
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

proptest! {
    /// A record is emitted iff the configured level is at most its level
    #[test]
    fn test_level_filter_is_monotonic(configured in any_level(), message in any_level()) {
        let counter = Counter::default();
        let logger = Logger::with_appender(counter.clone());
        logger.set_flags(LogFlags::empty());
        logger.set_level(configured);

        match message {
            LogLevel::Debug => logger.debug("m"),
            LogLevel::Info => logger.info("m"),
            LogLevel::Warn => logger.warn("m"),
            // Error without a base path only reaches the default stream
            LogLevel::Error => logger.error("m"),
            LogLevel::Fatal => logger.fatal("m"),
        }

        let emitted = *counter.0.lock() == 1;
        prop_assert_eq!(emitted, configured <= message);
    }

    /// Debug passes iff all-enabled or the current module is enabled
    #[test]
    fn test_debug_module_filter(
        enabled in proptest::collection::vec(0i32..16, 0..6),
        current in 0i32..16,
    ) {
        let filter = LogFilter::new();
        filter.set_level(LogLevel::Debug);
        filter.clear_debug_modules();
        for module in &enabled {
            filter.add_debug_module(*module);
        }
        filter.set_current_debug_module(current);

        let set: HashSet<i32> = enabled.iter().copied().collect();
        let all_enabled = set.contains(&DebugModule::ALL.0);
        let expected = all_enabled || set.contains(&current);

        prop_assert_eq!(filter.is_enabled(LogLevel::Debug), expected);
        // Non-debug levels ignore the module filter
        prop_assert!(filter.is_enabled(LogLevel::Info));
    }

    /// Unknown bits are dropped, known bits survive
    #[test]
    fn test_flags_from_config(value in 0i64..1024) {
        let flags = LogFlags::from_config_value(value).unwrap();
        prop_assert_eq!(i64::from(flags.bits()), value & 0b1111);
    }
}

// ============================================================================
// Naming Tests
// ============================================================================

proptest! {
    /// Named categories always append `.<category>` to the base path
    #[test]
    fn test_category_path_appends(stem in "[a-z]{1,8}", category in "[a-z]{1,8}") {
        prop_assume!(category != "error");
        let base = format!("/var/log/{}.log", stem);
        let path = rust_clog::core::category_path(Path::new(&base), &category);
        prop_assert_eq!(path.to_string_lossy().to_string(), format!("{}.{}", base, category));
    }

    /// The error category swaps the extension
    #[test]
    fn test_error_category_path(stem in "[a-z]{1,8}", ext in "[a-z]{1,4}") {
        let base = format!("logs/{}.{}", stem, ext);
        let path = rust_clog::core::category_path(Path::new(&base), "error");
        prop_assert_eq!(path.to_string_lossy().to_string(), format!("logs/{}.error.log", stem));
    }
}
