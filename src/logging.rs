//! Logging macros.
//!
//! The router never talks to a logging crate directly. Every call site goes
//! through one of the macros below, which forward to [`log`](https://docs.rs/log)
//! or [`tracing`](https://docs.rs/tracing) depending on the enabled feature.
//! Enable at most one of the two.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! With neither feature enabled the macros only type-check their arguments,
//! so values bound for logging alone still count as used.
//!
//! ```ignore
//! use route_stack::{debug_log, warn_log};
//!
//! debug_log!("push '{}' (depth {})", entry, stack.len());
//! warn_log!("no route registered for '{}'", id);
//! ```

/// Forward a record at the given level to whichever backend is enabled.
#[doc(hidden)]
#[macro_export]
macro_rules! __route_stack_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "tracing")))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    };
}

/// Emit a **trace**-level record (per-handler middleware calls).
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__route_stack_log!(trace, $($arg)*)
    };
}

/// Emit a **debug**-level record (stack mutations, notifier decisions).
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__route_stack_log!(debug, $($arg)*)
    };
}

/// Emit an **info**-level record (registration).
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__route_stack_log!(info, $($arg)*)
    };
}

/// Emit a **warn**-level record.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__route_stack_log!(warn, $($arg)*)
    };
}

/// Emit an **error**-level record.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__route_stack_log!(error, $($arg)*)
    };
}
