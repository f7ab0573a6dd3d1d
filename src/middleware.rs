//! Route middleware: handlers that may redirect a navigation.
//!
//! Middleware is attached to a [`RouteDefinition`](crate::RouteDefinition)
//! and runs every time an entry of that route is about to become the top of
//! the stack. A handler inspects the entry and the router's store and either
//! lets the navigation through (`Ok(None)`) or asks for a redirect
//! (`Ok(Some(entry))`).
//!
//! All handlers are **synchronous**.
//!
//! # Execution order
//!
//! A route lists its middleware in declaration order. Handlers run in that
//! order and the first one that returns a redirect stops the rest.
//!
//! # Referencing middleware
//!
//! | Form | When to use |
//! |------|-------------|
//! | [`MiddlewareRef::Handler`] | The route owns the handler directly |
//! | [`MiddlewareRef::Named`] | Shared handler looked up in the [`MiddlewareRegistry`] when the route runs |
//!
//! Named lookups happen at call time, so registering a new handler under an
//! existing name changes the behavior of routes that were defined earlier.
//!
//! # Example
//!
//! ```
//! use route_stack::{middleware_fn, RouteEntry, RouteMiddleware};
//!
//! struct Session { logged_in: bool }
//!
//! let auth = middleware_fn(|_entry: &RouteEntry, session: &Session| {
//!     Ok((!session.logged_in).then(|| RouteEntry::new("login")))
//! });
//!
//! let redirect = auth.handle(&RouteEntry::new("account"), &Session { logged_in: false });
//! assert_eq!(redirect.unwrap(), Some(RouteEntry::new("login")));
//! ```

use crate::entry::RouteEntry;
use crate::error::NavigationError;
use crate::{info_log, trace_log};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// What a handler returns: `None` to continue, `Some(entry)` to redirect.
pub type MiddlewareResult = Result<Option<RouteEntry>, NavigationError>;

// ============================================================================
// RouteMiddleware trait
// ============================================================================

/// A handler run before an entry settles on top of the stack.
///
/// `S` is the router's store type.
pub trait RouteMiddleware<S>: Send + Sync + 'static {
    /// Inspect `entry` and decide whether to redirect.
    fn handle(&self, entry: &RouteEntry, store: &S) -> MiddlewareResult;

    /// Middleware name for debugging.
    fn name(&self) -> &str {
        "RouteMiddleware"
    }
}

// ============================================================================
// middleware_fn helper
// ============================================================================

/// Create middleware from a closure.
///
/// # Example
///
/// ```
/// use route_stack::{middleware_fn, RouteEntry};
///
/// let maintenance = middleware_fn(|_entry: &RouteEntry, down: &bool| {
///     Ok(down.then(|| RouteEntry::new("maintenance")))
/// })
/// .named("maintenance");
/// ```
pub fn middleware_fn<S, F>(f: F) -> FnMiddleware<F>
where
    F: Fn(&RouteEntry, &S) -> MiddlewareResult + Send + Sync + 'static,
{
    FnMiddleware {
        f,
        name: "FnMiddleware".to_string(),
    }
}

/// Middleware created from a closure via [`middleware_fn`].
pub struct FnMiddleware<F> {
    f: F,
    name: String,
}

impl<F> FnMiddleware<F> {
    /// Give the middleware a name for logs and error messages.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<S, F> RouteMiddleware<S> for FnMiddleware<F>
where
    F: Fn(&RouteEntry, &S) -> MiddlewareResult + Send + Sync + 'static,
{
    fn handle(&self, entry: &RouteEntry, store: &S) -> MiddlewareResult {
        (self.f)(entry, store)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// MiddlewareRef
// ============================================================================

/// One element of a route's middleware list.
pub enum MiddlewareRef<S> {
    /// A handler owned by the route.
    Handler(Arc<dyn RouteMiddleware<S>>),
    /// A handler looked up by name in the [`MiddlewareRegistry`] at call time.
    Named(String),
}

impl<S: 'static> MiddlewareRef<S> {
    /// Wrap a handler.
    pub fn handler(middleware: impl RouteMiddleware<S>) -> Self {
        MiddlewareRef::Handler(Arc::new(middleware))
    }

    /// Refer to a registered handler by name.
    pub fn named(name: impl Into<String>) -> Self {
        MiddlewareRef::Named(name.into())
    }

    /// Resolve to a concrete handler.
    pub(crate) fn resolve<'a>(
        &'a self,
        registry: &'a MiddlewareRegistry<S>,
    ) -> Result<&'a dyn RouteMiddleware<S>, NavigationError> {
        match self {
            MiddlewareRef::Handler(handler) => Ok(handler.as_ref()),
            MiddlewareRef::Named(name) => registry.get(name).ok_or_else(|| {
                NavigationError::MiddlewareNotRegistered { name: name.clone() }
            }),
        }
    }
}

impl<S: 'static> Clone for MiddlewareRef<S> {
    fn clone(&self) -> Self {
        match self {
            MiddlewareRef::Handler(handler) => MiddlewareRef::Handler(Arc::clone(handler)),
            MiddlewareRef::Named(name) => MiddlewareRef::Named(name.clone()),
        }
    }
}

impl<S: 'static> fmt::Debug for MiddlewareRef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiddlewareRef::Handler(handler) => {
                f.debug_tuple("Handler").field(&handler.name()).finish()
            }
            MiddlewareRef::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

impl<S: 'static> From<&str> for MiddlewareRef<S> {
    fn from(name: &str) -> Self {
        MiddlewareRef::Named(name.to_string())
    }
}

impl<S: 'static> From<String> for MiddlewareRef<S> {
    fn from(name: String) -> Self {
        MiddlewareRef::Named(name)
    }
}

impl<S: 'static> From<Arc<dyn RouteMiddleware<S>>> for MiddlewareRef<S> {
    fn from(handler: Arc<dyn RouteMiddleware<S>>) -> Self {
        MiddlewareRef::Handler(handler)
    }
}

// ============================================================================
// MiddlewareRegistry
// ============================================================================

/// Flat name → handler map. Later registrations for a name win.
pub struct MiddlewareRegistry<S> {
    handlers: HashMap<String, Arc<dyn RouteMiddleware<S>>>,
}

impl<S: 'static> MiddlewareRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `middleware` under `name`, replacing any previous handler.
    pub fn register(&mut self, name: impl Into<String>, middleware: impl RouteMiddleware<S>) {
        self.register_arc(name, Arc::new(middleware));
    }

    /// Register an already shared handler.
    pub fn register_arc(
        &mut self,
        name: impl Into<String>,
        middleware: Arc<dyn RouteMiddleware<S>>,
    ) {
        let name = name.into();
        if self.handlers.insert(name.clone(), middleware).is_some() {
            info_log!("Replaced middleware '{}'", name);
        } else {
            info_log!("Registered middleware '{}'", name);
        }
    }

    /// Merge many handlers at once.
    pub fn extend<I, N>(&mut self, handlers: I)
    where
        I: IntoIterator<Item = (N, Arc<dyn RouteMiddleware<S>>)>,
        N: Into<String>,
    {
        for (name, handler) in handlers {
            self.register_arc(name, handler);
        }
    }

    /// Look up a handler.
    pub fn get(&self, name: &str) -> Option<&dyn RouteMiddleware<S>> {
        let found = self.handlers.get(name).map(|h| h.as_ref());
        trace_log!("Middleware lookup '{}' → {}", name, found.is_some());
        found
    }

    /// Return `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Return `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<S: 'static> Default for MiddlewareRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static> fmt::Debug for MiddlewareRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("MiddlewareRegistry")
            .field("handlers", &names)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
