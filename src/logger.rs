//! Structured logging system with visual formatting.
//!
//! This module provides the agent's terminal output. It includes different log
//! levels and a few layout helpers that draw the same box-drawing structure
//! for every run:
//!
//! ```text
//! ┏ service-agent v0.1.0 ━━╸
//! ┃
//! ┣ Registering service at /org/bluez/service_agent_4242
//! ┃   Name: Example service
//! ┣[INFO] Starting example service
//! ╹
//! ```
//!
//! Informational lines go to stdout. Warnings and errors go to stderr so that
//! failures are visible even when stdout is redirected.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

// Use an AtomicBool instead of thread_local: the signal thread, the ownership
// watch and zbus's executor all log.
static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Output stream a formatted line is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Main logging interface providing structured output formatting.
///
/// ## Logging Conventions
///
/// - **`log_block_start!`**: starts a new conceptual block (`┃` spacer, then `┣ message`).
/// - **`log_decorated!`**: a line inside the current block (`┣ message`).
/// - **`log_indented!`**: nested detail under the previous line (`┃   message`).
/// - **`log_pipe!`**: a single `┃` spacer, used before a semantic message that opens a block.
/// - **`log_version!`** / **`log_end!`**: header and final marker, once per run.
/// - **`log_info!`, `log_warning!`, `log_error!`, `log_debug!`**: semantic levels with a
///   `[LEVEL]` prefix. `log_debug!` only prints when debug output is enabled.
/// - **`log_error_exit!`**: terminal error line (`┗[ERROR]`) printed right before a
///   failing exit.
pub struct Log;

impl Log {
    /// Enable or disable all output.
    ///
    /// Tests switch logging off so that assertions are not interleaved with
    /// box-drawing output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable `log_debug!` output and timestamp prefixes.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if debug output is enabled.
    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Get the line prefix.
    ///
    /// In debug mode every line carries the local wall-clock time as
    /// `[HH:MM:SS.mmm] ` so bus traffic can be correlated with the daemon's
    /// own logs. Returns an empty string otherwise.
    pub fn get_timestamp_prefix() -> String {
        if Self::is_debug() {
            format!("[{}] ", chrono::Local::now().format("%H:%M:%S%.3f"))
        } else {
            String::new()
        }
    }
}

// Public function that routes output (needed by macros)
pub fn write_output(stream: Stream, text: &str) {
    match stream {
        Stream::Stdout => {
            let mut stdout = std::io::stdout().lock();
            let _ = stdout.write_all(text.as_bytes());
            let _ = stdout.flush();
        }
        Stream::Stderr => {
            let mut stderr = std::io::stderr().lock();
            let _ = stderr.write_all(text.as_bytes());
            let _ = stderr.flush();
        }
    }
}

/// Internal helper shared by all line macros.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($stream:expr, $layout:expr, $message:expr) => {{
        use $crate::logger::Log;
        if Log::is_enabled() {
            let layout = $layout;
            let prefix = Log::get_timestamp_prefix();
            let message = ::std::string::ToString::to_string(&$message);
            let formatted: String = layout(prefix.as_str(), message.as_str());
            $crate::logger::write_output($stream, &formatted);
        }
    }};
}

// # Logging Macros

/// Log a decorated message, typically as part of an existing block.
#[macro_export]
macro_rules! log_decorated {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stdout,
            |p: &str, m: &str| format!("{p}┣ {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stdout,
            |p: &str, m: &str| format!("{p}┣ {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log an indented message for sub-items or details within a block.
#[macro_export]
macro_rules! log_indented {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stdout,
            |p: &str, m: &str| format!("{p}┃   {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stdout,
            |p: &str, m: &str| format!("{p}┃   {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log a visual pipe separator for vertical spacing.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::__log_line!(
            $crate::logger::Stream::Stdout,
            |p: &str, _m: &str| format!("{p}┃\n"),
            String::new()
        )
    };
}

/// Log a block start message, initiating a new conceptual block of information.
#[macro_export]
macro_rules! log_block_start {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stdout,
            |p: &str, m: &str| format!("{p}┃\n{p}┣ {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stdout,
            |p: &str, m: &str| format!("{p}┃\n{p}┣ {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log the application version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::__log_line!(
            $crate::logger::Stream::Stdout,
            |p: &str, m: &str| format!("{p}┏ service-agent v{m} ━━╸\n"),
            env!("CARGO_PKG_VERSION")
        )
    };
}

/// Log the final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::__log_line!(
            $crate::logger::Stream::Stdout,
            |p: &str, _m: &str| format!("{p}╹\n"),
            String::new()
        )
    };
}

/// Log an informational message with pipe prefix and green-colored level.
#[macro_export]
macro_rules! log_info {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stdout,
            |p: &str, m: &str| format!("{p}┣[\x1b[32mINFO\x1b[0m] {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stdout,
            |p: &str, m: &str| format!("{p}┣[\x1b[32mINFO\x1b[0m] {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log a warning message with pipe prefix and yellow-colored level.
#[macro_export]
macro_rules! log_warning {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stderr,
            |p: &str, m: &str| format!("{p}┣[\x1b[33mWARNING\x1b[0m] {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stderr,
            |p: &str, m: &str| format!("{p}┣[\x1b[33mWARNING\x1b[0m] {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log an error message with pipe prefix and red-colored level.
#[macro_export]
macro_rules! log_error {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stderr,
            |p: &str, m: &str| format!("{p}┣[\x1b[31mERROR\x1b[0m] {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stderr,
            |p: &str, m: &str| format!("{p}┣[\x1b[31mERROR\x1b[0m] {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log an error message with a pipe prefix and terminal corner.
/// Used right before the process exits with a failure status.
#[macro_export]
macro_rules! log_error_exit {
    ($fmt:literal $($arg:tt)*) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stderr,
            |p: &str, m: &str| format!("{p}┃\n{p}┗[\x1b[31mERROR\x1b[0m] {m}\n"),
            format!($fmt $($arg)*)
        )
    };
    ($expr:expr) => {
        $crate::__log_line!(
            $crate::logger::Stream::Stderr,
            |p: &str, m: &str| format!("{p}┃\n{p}┗[\x1b[31mERROR\x1b[0m] {m}\n"),
            format!("{}", $expr)
        )
    };
}

/// Log a debug message. Only printed when debug output is enabled.
#[macro_export]
macro_rules! log_debug {
    ($fmt:literal $($arg:tt)*) => {
        if $crate::logger::Log::is_debug() {
            $crate::__log_line!(
                $crate::logger::Stream::Stdout,
                |p: &str, m: &str| format!("{p}┣[\x1b[32mDEBUG\x1b[0m] {m}\n"),
                format!($fmt $($arg)*)
            )
        }
    };
    ($expr:expr) => {
        if $crate::logger::Log::is_debug() {
            $crate::__log_line!(
                $crate::logger::Stream::Stdout,
                |p: &str, m: &str| format!("{p}┣[\x1b[32mDEBUG\x1b[0m] {m}\n"),
                format!("{}", $expr)
            )
        }
    };
}
