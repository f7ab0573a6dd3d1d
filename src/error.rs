//! Error and outcome types for stack operations.
//!
//! - [`NavigationOutcome`] — what a successful `push`/`pop`/`replace` did
//!   (`Unchanged` or `Settled`).
//! - [`NavigationError`] — why an operation could not finish (unregistered
//!   route or middleware, a failing handler, or the optional redirect limit).
//!
//! # Examples
//!
//! ```
//! use route_stack::{NavigationError, NavigationOutcome, RouteEntry};
//!
//! let outcome = NavigationOutcome::Settled { entry: RouteEntry::new("home") };
//! assert!(outcome.is_settled());
//! assert_eq!(outcome.entry().and_then(|e| e.id()), Some("home"));
//!
//! let err = NavigationError::RouteNotRegistered { id: "nope".into() };
//! assert_eq!(err.to_string(), "Route not registered: nope");
//! ```

use crate::entry::RouteEntry;
use std::fmt;

// ============================================================================
// Navigation Outcome
// ============================================================================

/// Result of a stack operation that completed without error.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// The requested entry was already on top; nothing changed.
    Unchanged,
    /// The operation ran to completion and `entry` was handed to the
    /// notifier. After redirects this is the final redirect target.
    Settled { entry: RouteEntry },
}

impl NavigationOutcome {
    /// Check if the operation was a no-op.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, NavigationOutcome::Unchanged)
    }

    /// Check if the operation settled on an entry.
    pub fn is_settled(&self) -> bool {
        matches!(self, NavigationOutcome::Settled { .. })
    }

    /// Get the settled entry, if any.
    pub fn entry(&self) -> Option<&RouteEntry> {
        match self {
            NavigationOutcome::Settled { entry } => Some(entry),
            NavigationOutcome::Unchanged => None,
        }
    }
}

// ============================================================================
// Navigation Error
// ============================================================================

/// Failures raised by stack operations.
///
/// Implements [`std::error::Error`] and [`Display`](std::fmt::Display).
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// An entry names a route id that was never registered.
    RouteNotRegistered { id: String },

    /// A route refers to middleware by a name that is not registered.
    MiddlewareNotRegistered { name: String },

    /// A middleware handler failed.
    Middleware { name: String, message: String },

    /// The configured redirect limit was hit.
    RedirectLimitExceeded { depth: usize, target: String },
}

impl NavigationError {
    /// Build a handler failure.
    pub fn middleware(name: impl Into<String>, message: impl Into<String>) -> Self {
        NavigationError::Middleware {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Check if this is a missing route.
    pub fn is_route_not_registered(&self) -> bool {
        matches!(self, NavigationError::RouteNotRegistered { .. })
    }

    /// Check if this is a redirect limit hit.
    pub fn is_redirect_limit(&self) -> bool {
        matches!(self, NavigationError::RedirectLimitExceeded { .. })
    }
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::RouteNotRegistered { id } => {
                write!(f, "Route not registered: {}", id)
            }
            NavigationError::MiddlewareNotRegistered { name } => {
                write!(f, "Middleware not registered: {}", name)
            }
            NavigationError::Middleware { name, message } => {
                write!(f, "Middleware '{}' failed: {}", name, message)
            }
            NavigationError::RedirectLimitExceeded { depth, target } => {
                write!(
                    f,
                    "Redirect limit exceeded (depth {}): target '{}'",
                    depth, target
                )
            }
        }
    }
}

impl std::error::Error for NavigationError {}

// ============================================================================
// Tests
// ============================================================================
