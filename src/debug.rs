//! Debug logging for the viewer front ends.
//!
//! Off by default. Enabled with `--debug` on `wave-render` or with
//! `TRUENO_WAVE_DEBUG=1`. The parsing, viewport and rendering core never
//! logs; diagnostics from parsing are returned as data.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

/// Environment variable that turns debug output on.
pub const ENV_VAR: &str = "TRUENO_WAVE_DEBUG";

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Millis since UNIX epoch at `enable()`.
static START_TIME_MS: AtomicU64 = AtomicU64::new(0);

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Enables debug mode globally.
pub fn enable() {
    START_TIME_MS.store(now_ms(), Ordering::SeqCst);
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

/// Disables debug mode globally.
pub fn disable() {
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

/// Enables debug mode when [`ENV_VAR`] is set to `1` or `true`.
///
/// Returns whether debug mode is now on.
pub fn init_from_env() -> bool {
    let wanted = std::env::var(ENV_VAR)
        .map(|v| env_flag(&v))
        .unwrap_or(false);
    if wanted {
        enable();
    }
    is_enabled()
}

fn env_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Returns true if debug mode is enabled.
#[inline]
pub fn is_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

fn elapsed_ms() -> u64 {
    let start = START_TIME_MS.load(Ordering::Relaxed);
    if start == 0 {
        return 0;
    }
    now_ms().saturating_sub(start)
}

/// Debug log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Function entry/exit and timings
    Trace,
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings, including parse diagnostics
    Warn,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
        }
    }

    fn color_code(self) -> &'static str {
        match self {
            Level::Trace => "\x1b[90m",
            Level::Debug => "\x1b[36m",
            Level::Info => "\x1b[32m",
            Level::Warn => "\x1b[33m",
        }
    }
}

/// Logs a message to stderr if debug mode is enabled.
///
/// Format: `[+0012ms] [LEVEL] [component] message`.
pub fn log(level: Level, component: &str, message: &str) {
    if !is_enabled() {
        return;
    }

    let _ = writeln!(
        io::stderr(),
        "[+{:04}ms] {}[{:5}]\x1b[0m [{}] {}",
        elapsed_ms(),
        level.color_code(),
        level.as_str(),
        component,
        message
    );
}

/// Logs with format arguments.
#[macro_export]
macro_rules! debug_log {
    ($level:expr, $component:expr, $($arg:tt)*) => {
        if $crate::debug::is_enabled() {
            $crate::debug::log($level, $component, &format!($($arg)*));
        }
    };
}

/// Convenience macro for debug level.
#[macro_export]
macro_rules! debug {
    ($component:expr, $($arg:tt)*) => {
        $crate::debug_log!($crate::debug::Level::Debug, $component, $($arg)*)
    };
}

/// Convenience macro for info level.
#[macro_export]
macro_rules! info {
    ($component:expr, $($arg:tt)*) => {
        $crate::debug_log!($crate::debug::Level::Info, $component, $($arg)*)
    };
}

/// Convenience macro for warn level.
#[macro_export]
macro_rules! warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::debug_log!($crate::debug::Level::Warn, $component, $($arg)*)
    };
}

/// RAII guard that logs how long a scope took.
pub struct TimingGuard {
    component: &'static str,
    operation: String,
    start: Instant,
}

impl TimingGuard {
    /// Creates a new timing guard.
    pub fn new(component: &'static str, operation: impl Into<String>) -> Self {
        let operation = operation.into();
        if is_enabled() {
            log(Level::Trace, component, &format!("-> {operation}"));
        }
        Self {
            component,
            operation,
            start: Instant::now(),
        }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if is_enabled() {
            log(
                Level::Trace,
                self.component,
                &format!(
                    "<- {} ({:.2}ms)",
                    self.operation,
                    self.start.elapsed().as_secs_f64() * 1000.0
                ),
            );
        }
    }
}

/// Creates a timing guard for the rest of the scope.
#[macro_export]
macro_rules! time_scope {
    ($component:expr, $operation:expr) => {
        let _guard = $crate::debug::TimingGuard::new($component, $operation);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_disable() {
        disable();
        assert!(!is_enabled());

        enable();
        assert!(is_enabled());
        log(Level::Info, "test", "visible on stderr");

        disable();
        assert!(!is_enabled());
    }

    #[test]
    fn test_env_flag_values() {
        assert!(env_flag("1"));
        assert!(env_flag("TRUE"));
        assert!(env_flag(" on "));
        assert!(!env_flag("0"));
        assert!(!env_flag(""));
        assert!(!env_flag("no"));
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(Level::Trace.as_str(), "TRACE");
        assert_eq!(Level::Warn.as_str(), "WARN");
        assert_ne!(Level::Debug.color_code(), Level::Info.color_code());
    }

    #[test]
    fn test_log_when_disabled_does_nothing() {
        disable();
        log(Level::Debug, "test", "message");
        crate::debug!("test", "formatted {}", 1);
    }

    #[test]
    fn test_timing_guard_records_operation() {
        let guard = TimingGuard::new("render", "frame");
        assert_eq!(guard.component, "render");
        assert_eq!(guard.operation, "frame");
        drop(guard);
    }
}
