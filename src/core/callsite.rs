//! Call-site lookup from the stack at log time
//!
//! Depth counts logical frames (inlined functions included) above the
//! function that called [`Callsite::capture`]. Depth 0 is that function,
//! depth 1 its caller, and so on.

use super::flags::LogFlags;
use std::path::Path;

const ANCHOR: &str = "Callsite::capture";
const UNKNOWN_FILE: &str = "???";
const UNKNOWN_FUNCTION: &str = "?";

/// Source location and enclosing function of one stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callsite {
    pub file: String,
    pub line: u32,
    pub function: Option<String>,
}

impl Callsite {
    /// Placeholder used when the stack cannot be resolved.
    pub fn unknown() -> Self {
        Self {
            file: UNKNOWN_FILE.to_string(),
            line: 0,
            function: None,
        }
    }

    /// Resolve the frame `depth` levels above the caller of this function.
    #[inline(never)]
    pub fn capture(depth: usize) -> Self {
        let mut past_anchor = false;
        let mut remaining = depth;
        let mut found: Option<Callsite> = None;

        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if found.is_some() {
                    return;
                }
                let name = symbol.name().map(|n| format!("{:#}", n));
                let is_anchor = name.as_deref().is_some_and(|n| n.contains(ANCHOR));
                if !past_anchor {
                    past_anchor = is_anchor;
                    return;
                }
                if is_anchor {
                    return;
                }
                if remaining > 0 {
                    remaining -= 1;
                    return;
                }
                found = Some(Callsite {
                    file: symbol
                        .filename()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| UNKNOWN_FILE.to_string()),
                    line: symbol.lineno().unwrap_or(0),
                    function: name,
                });
            });
            found.is_none()
        });

        found.unwrap_or_else(Callsite::unknown)
    }

    /// Basename of [`Callsite::file`].
    pub fn short_file(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.file)
    }

    /// Render the decoration selected by `flags`, e.g. `lib.rs:42 app::run()`.
    pub fn render(&self, flags: LogFlags) -> String {
        let mut out = String::new();
        if flags.contains(LogFlags::LONG_FILE) {
            out.push_str(&format!("{}:{} ", self.file, self.line));
        } else if flags.contains(LogFlags::SHORT_FILE) {
            out.push_str(&format!("{}:{} ", self.short_file(), self.line));
        }
        if flags.contains(LogFlags::FUNC_NAME) {
            out.push_str(self.function.as_deref().unwrap_or(UNKNOWN_FUNCTION));
            out.push_str("()");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline(never)]
    fn helper_reporting_caller() -> Callsite {
        Callsite::capture(1)
    }

    #[test]
    fn test_capture_reports_immediate_caller() {
        let site = Callsite::capture(0);
        assert_eq!(site.short_file(), "callsite.rs");
        assert!(site.line > 0);
        let function = site.function.expect("function name");
        assert!(function.contains("test_capture_reports_immediate_caller"), "{}", function);
    }

    #[test]
    fn test_capture_skips_wrapper_frames() {
        let site = helper_reporting_caller();
        let function = site.function.expect("function name");
        assert!(function.contains("test_capture_skips_wrapper_frames"), "{}", function);
    }

    #[test]
    fn test_render_variants() {
        let site = Callsite {
            file: "/src/app/server.rs".to_string(),
            line: 17,
            function: Some("app::server::start".to_string()),
        };

        assert_eq!(site.render(LogFlags::SHORT_FILE), "server.rs:17 ");
        assert_eq!(site.render(LogFlags::LONG_FILE), "/src/app/server.rs:17 ");
        assert_eq!(
            site.render(LogFlags::LONG_FILE | LogFlags::SHORT_FILE),
            "/src/app/server.rs:17 "
        );
        assert_eq!(
            site.render(LogFlags::SHORT_FILE | LogFlags::FUNC_NAME),
            "server.rs:17 app::server::start()"
        );
        assert_eq!(site.render(LogFlags::ERROR_EXIT), "");
    }

    #[test]
    fn test_unknown_placeholder() {
        let site = Callsite::unknown();
        assert_eq!(
            site.render(LogFlags::SHORT_FILE | LogFlags::FUNC_NAME),
            "???:0 ?()"
        );
    }

    #[test]
    fn test_capture_beyond_stack_falls_back() {
        let site = Callsite::capture(100_000);
        assert_eq!(site, Callsite::unknown());
    }
}
