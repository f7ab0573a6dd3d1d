//! Route definitions and the id → route registry.
//!
//! A [`RouteDefinition`] is what the router knows about a route id: an
//! optional middleware list and an opaque payload owned by whoever renders
//! the route. The router never looks inside the payload; it only hands a
//! reference to it to the subscriber together with each change.
//!
//! A route *without* a middleware list is a pass-through: entries for it
//! always settle. A route with a list (even an empty one) takes part in
//! redirect-chain resolution.
//!
//! # Example
//!
//! ```
//! use route_stack::{middleware_fn, RouteDefinition, RouteEntry};
//!
//! let home: RouteDefinition<(), &str> = RouteDefinition::new("HomePage");
//! assert!(!home.has_middleware());
//!
//! let account = RouteDefinition::<(), _>::new("AccountPage")
//!     .middleware_named("auth")
//!     .middleware(middleware_fn(|_: &RouteEntry, _: &()| Ok(None)));
//! assert_eq!(account.middleware_list().map(<[_]>::len), Some(2));
//! ```

use crate::middleware::{MiddlewareRef, RouteMiddleware};
use crate::info_log;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// RouteDefinition
// ============================================================================

/// What the router knows about one route id.
pub struct RouteDefinition<S, P = ()> {
    middleware: Option<Vec<MiddlewareRef<S>>>,
    payload: P,
}

impl<S: 'static, P> RouteDefinition<S, P> {
    /// Create a pass-through route carrying `payload`.
    pub fn new(payload: P) -> Self {
        Self {
            middleware: None,
            payload,
        }
    }

    /// Append a handler owned by this route.
    pub fn middleware(self, middleware: impl RouteMiddleware<S>) -> Self {
        self.middleware_ref(MiddlewareRef::handler(middleware))
    }

    /// Append a reference to middleware registered under `name`.
    ///
    /// The name is resolved each time the route runs, not now.
    pub fn middleware_named(self, name: impl Into<String>) -> Self {
        self.middleware_ref(MiddlewareRef::named(name))
    }

    /// Append an already built list element.
    pub fn middleware_ref(mut self, middleware: MiddlewareRef<S>) -> Self {
        self.middleware.get_or_insert_with(Vec::new).push(middleware);
        self
    }

    /// Replace the whole middleware list.
    ///
    /// An empty list still marks the route as middleware-bearing.
    pub fn middleware_list_from(mut self, list: Vec<MiddlewareRef<S>>) -> Self {
        self.middleware = Some(list);
        self
    }

    /// Declared middleware, or `None` for a pass-through route.
    pub fn middleware_list(&self) -> Option<&[MiddlewareRef<S>]> {
        self.middleware.as_deref()
    }

    /// Return `true` if the route declares a middleware list.
    pub fn has_middleware(&self) -> bool {
        self.middleware.is_some()
    }

    /// The opaque payload.
    pub fn payload(&self) -> &P {
        &self.payload
    }
}

impl<S: 'static, P: Default> Default for RouteDefinition<S, P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

impl<S: 'static, P: fmt::Debug> fmt::Debug for RouteDefinition<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("middleware", &self.middleware)
            .field("payload", &self.payload)
            .finish()
    }
}

// ============================================================================
// RouteRegistry
// ============================================================================

/// Id → route map. Later registrations for an id win.
pub struct RouteRegistry<S, P = ()> {
    routes: HashMap<String, Arc<RouteDefinition<S, P>>>,
}

impl<S: 'static, P> RouteRegistry<S, P> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register `route` under `id`, replacing any previous definition.
    pub fn register(&mut self, id: impl Into<String>, route: RouteDefinition<S, P>) {
        let id = id.into();
        if self.routes.insert(id.clone(), Arc::new(route)).is_some() {
            info_log!("Replaced route '{}'", id);
        } else {
            info_log!("Registered route '{}'", id);
        }
    }

    /// Merge many routes at once.
    pub fn extend<I, N>(&mut self, routes: I)
    where
        I: IntoIterator<Item = (N, RouteDefinition<S, P>)>,
        N: Into<String>,
    {
        for (id, route) in routes {
            self.register(id, route);
        }
    }

    /// Look up a route by id.
    pub fn get(&self, id: &str) -> Option<&RouteDefinition<S, P>> {
        self.routes.get(id).map(Arc::as_ref)
    }

    /// Return `true` if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.routes.contains_key(id)
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Return `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterate over registered ids (unordered).
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}

impl<S: 'static, P> Default for RouteRegistry<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static, P> fmt::Debug for RouteRegistry<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.routes.keys().collect();
        ids.sort();
        f.debug_struct("RouteRegistry").field("routes", &ids).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
