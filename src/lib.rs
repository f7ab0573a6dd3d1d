//! # route-stack
//!
//! A navigation-state controller for single-page applications:
//!
//! - **Navigation stack** - bounded history of [`RouteEntry`] values with
//!   `push`, `pop`, `replace`, `reset` and `peek`
//! - **Value semantics** - entries are immutable and compare by id and deep
//!   parameter equality
//! - **Middleware** - per-route handlers that may redirect, with named
//!   handlers resolved at call time and redirect chains followed
//!   recursively
//! - **Change notification** - a single subscriber, notified once per
//!   distinct top entry, with notifications queued until it is installed
//!
//! Rendering, URL handling and browser history live outside this crate:
//! they register routes and consume notifications.
//!
//! # Quick Start
//!
//! ```
//! use route_stack::{middleware_fn, RouteDefinition, RouteEntry, Router};
//!
//! let mut router: Router = Router::default();
//! router.add_route("home", RouteDefinition::new(()));
//! router.add_route("user", RouteDefinition::new(()));
//! router.add_route(
//!     "legacy-user",
//!     RouteDefinition::new(()).middleware(middleware_fn(|entry: &RouteEntry, _: &()| {
//!         Ok(Some(entry.with_id("user")))
//!     })),
//! );
//!
//! router.push("home").unwrap();
//! router.push(RouteEntry::new("legacy-user").with_param("id", 7)).unwrap();
//!
//! assert_eq!(router.current(), Some(&RouteEntry::new("user").with_param("id", 7)));
//! assert_eq!(router.len(), 3);
//!
//! // Popping uncovers the legacy entry, whose middleware redirects again.
//! router.pop().unwrap();
//! assert_eq!(router.len(), 3);
//! assert_eq!(router.peek(-2), Some(&RouteEntry::new("home")));
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)

#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Values
pub mod entry;
pub mod params;

// Routes and middleware
pub mod middleware;
pub mod resolve;
pub mod route;

// Engine
pub mod notifier;
pub mod router;
pub mod state;

// Error handling
pub mod error;

pub use entry::{IntoRouteEntry, RouteEntry};
pub use error::{NavigationError, NavigationOutcome};
pub use middleware::{
    middleware_fn, FnMiddleware, MiddlewareRef, MiddlewareRegistry, MiddlewareResult,
    RouteMiddleware,
};
pub use notifier::{ChangeNotifier, Subscriber};
pub use params::RouteParams;
pub use resolve::MiddlewareResolver;
pub use route::{RouteDefinition, RouteRegistry};
pub use router::Router;
pub use state::{NavigationStack, DEFAULT_MAX_DEPTH};
