#![deny(missing_docs)]
//! Shared logging utilities for the rephrase workspace.
//!
//! This crate provides the `rephrase_*` logging macros used across the
//! codebase, a per-thread session tag that prefixes log lines emitted while a
//! rephrase session is active, and a minimal test initializer for the global
//! logger.

use std::cell::RefCell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Session id of the rephrase job the current thread is working on.
    static SESSION_TAG: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Tags subsequent log lines on this thread with the given session id.
pub fn set_session_tag(session_id: &str) {
    SESSION_TAG.with(|tag| *tag.borrow_mut() = Some(session_id.to_owned()));
}

/// Removes the session tag for the current thread.
pub fn clear_session_tag() {
    SESSION_TAG.with(|tag| *tag.borrow_mut() = None);
}

/// Returns the log prefix for the current thread, e.g. `"[session abc] "`.
/// Empty when no session is active.
pub fn session_prefix() -> String {
    SESSION_TAG.with(|tag| match tag.borrow().as_deref() {
        Some(id) => format!("[session {id}] "),
        None => String::new(),
    })
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! rephrase_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("{}{}", $crate::session_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! rephrase_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("{}{}", $crate::session_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! rephrase_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("{}{}", $crate::session_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! rephrase_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("{}{}", $crate::session_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! rephrase_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("{}{}", $crate::session_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
