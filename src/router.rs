//! The navigation stack engine.
//!
//! [`Router`] owns everything a navigation needs: the bounded
//! [`NavigationStack`], the route and middleware registries, the store that
//! middleware reads, the default entry, and the [`ChangeNotifier`].
//!
//! Every mutating operation follows the same pipeline:
//!
//! 1. normalize the input into a [`RouteEntry`];
//! 2. drop the call if the entry already sits on top;
//! 3. commit the stack change;
//! 4. run the owning route's middleware ([`MiddlewareResolver`]);
//! 5. on a redirect, `push` the target (the committed entry stays beneath
//!    it); otherwise trim the stack and notify.
//!
//! There is no global instance. Construct a router, register routes, and own
//! it wherever navigation state lives.
//!
//! # Example
//!
//! ```
//! use route_stack::{middleware_fn, RouteDefinition, RouteEntry, Router};
//! use std::sync::{Arc, Mutex};
//!
//! struct Session { user: Option<String> }
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let log = seen.clone();
//!
//! let mut router = Router::<Session, &str>::new(Session { user: None })
//!     .with_subscriber(move |entry: &RouteEntry, _route: Option<&RouteDefinition<Session, &str>>| {
//!         log.lock().unwrap().push(entry.to_string());
//!     });
//!
//! router.add_middleware("auth", middleware_fn(|_: &RouteEntry, s: &Session| {
//!     Ok(s.user.is_none().then(|| RouteEntry::new("login")))
//! }));
//! router.add_route("home", RouteDefinition::new("Home"));
//! router.add_route("login", RouteDefinition::new("Login"));
//! router.add_route("account", RouteDefinition::new("Account").middleware_named("auth"));
//!
//! router.push("home").unwrap();
//! router.push("account").unwrap();
//!
//! assert_eq!(router.current(), Some(&RouteEntry::new("login")));
//! assert_eq!(*seen.lock().unwrap(), vec!["home", "login"]);
//! ```

use crate::entry::{IntoRouteEntry, RouteEntry};
use crate::error::{NavigationError, NavigationOutcome};
use crate::middleware::{MiddlewareRegistry, RouteMiddleware};
use crate::notifier::ChangeNotifier;
use crate::resolve::{route_for, MiddlewareResolver, Redirect};
use crate::route::{RouteDefinition, RouteRegistry};
use crate::state::NavigationStack;
use crate::{debug_log, info_log};
use std::fmt;
use std::sync::Arc;

/// Navigation stack engine.
///
/// `S` is the store handed to middleware; `P` is the route payload type.
pub struct Router<S = (), P = ()> {
    stack: NavigationStack,
    routes: RouteRegistry<S, P>,
    middleware: MiddlewareRegistry<S>,
    notifier: ChangeNotifier<S, P>,
    store: S,
    default_entry: RouteEntry,
    redirect_limit: Option<usize>,
}

impl<S: 'static, P> Router<S, P> {
    /// Create a router around `store` with an empty stack and no routes.
    pub fn new(store: S) -> Self {
        Self {
            stack: NavigationStack::new(),
            routes: RouteRegistry::new(),
            middleware: MiddlewareRegistry::new(),
            notifier: ChangeNotifier::new(),
            store,
            default_entry: RouteEntry::empty(),
            redirect_limit: None,
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Set the entry evaluated by `pop()` when the stack runs empty.
    pub fn with_default_entry(mut self, entry: impl IntoRouteEntry) -> Self {
        self.default_entry = entry.into_route_entry();
        self
    }

    /// Install the initial subscriber.
    pub fn with_subscriber<F>(mut self, subscriber: F) -> Self
    where
        F: FnMut(&RouteEntry, Option<&RouteDefinition<S, P>>) + Send + 'static,
    {
        self.set_subscriber(subscriber);
        self
    }

    /// Bound the history to `max_depth` entries instead of the default 32.
    ///
    /// Only meaningful before the first navigation; any existing history is
    /// discarded.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.stack = NavigationStack::with_max_depth(max_depth);
        self
    }

    /// Fail navigations whose redirect chain needs more than `limit` hops.
    ///
    /// Without a limit, middleware that redirects in a cycle recurses until
    /// the thread's stack is exhausted.
    pub fn with_redirect_limit(mut self, limit: usize) -> Self {
        self.redirect_limit = Some(limit);
        self
    }

    /// Replace the subscriber and flush any queued notifications into it.
    pub fn set_subscriber<F>(&mut self, subscriber: F)
    where
        F: FnMut(&RouteEntry, Option<&RouteDefinition<S, P>>) + Send + 'static,
    {
        self.notifier.set_subscriber(Box::new(subscriber), &self.routes);
    }

    /// Remove the subscriber; notifications queue until a new one is set.
    pub fn take_subscriber(&mut self) -> bool {
        self.notifier.take_subscriber().is_some()
    }

    /// Replace the store.
    pub fn set_store(&mut self, store: S) {
        self.store = store;
    }

    /// The store handed to middleware.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store between navigations.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Replace the default entry.
    pub fn set_default_entry(&mut self, entry: impl IntoRouteEntry) {
        self.default_entry = entry.into_route_entry();
    }

    /// The entry used by `pop()` on an empty stack.
    pub fn default_entry(&self) -> &RouteEntry {
        &self.default_entry
    }

    /// Configured redirect limit, if any.
    pub fn redirect_limit(&self) -> Option<usize> {
        self.redirect_limit
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register (or replace) the route for `id`.
    pub fn add_route(&mut self, id: impl Into<String>, route: RouteDefinition<S, P>) {
        self.routes.register(id, route);
    }

    /// Merge many routes; later ids win.
    pub fn extend_routes<I, N>(&mut self, routes: I)
    where
        I: IntoIterator<Item = (N, RouteDefinition<S, P>)>,
        N: Into<String>,
    {
        self.routes.extend(routes);
    }

    /// Register (or replace) named middleware.
    pub fn add_middleware(
        &mut self,
        name: impl Into<String>,
        middleware: impl RouteMiddleware<S>,
    ) {
        self.middleware.register(name, middleware);
    }

    /// Merge many named middleware; later names win.
    pub fn extend_middleware<I, N>(&mut self, middleware: I)
    where
        I: IntoIterator<Item = (N, Arc<dyn RouteMiddleware<S>>)>,
        N: Into<String>,
    {
        self.middleware.extend(middleware);
    }

    /// Look up a registered route.
    pub fn route(&self, id: &str) -> Option<&RouteDefinition<S, P>> {
        self.routes.get(id)
    }

    /// Return `true` if a route is registered for `id`.
    pub fn has_route(&self, id: &str) -> bool {
        self.routes.contains(id)
    }

    /// The route registry.
    pub fn routes(&self) -> &RouteRegistry<S, P> {
        &self.routes
    }

    /// The named-middleware registry.
    pub fn middleware_registry(&self) -> &MiddlewareRegistry<S> {
        &self.middleware
    }

    // ========================================================================
    // Stack operations
    // ========================================================================

    /// Push an entry on top of the stack.
    ///
    /// A value-equal top makes this a no-op. If the route's middleware
    /// redirects, the pushed entry stays in history and the redirect target
    /// is pushed over it.
    ///
    /// The entry is committed before middleware runs and the stack is only
    /// trimmed once a push settles. When resolution fails (middleware error,
    /// unregistered redirect target, redirect limit) the history can sit one
    /// entry over [`max_depth`](Self::max_depth) until the next settled push.
    pub fn push(
        &mut self,
        entry: impl IntoRouteEntry,
    ) -> Result<NavigationOutcome, NavigationError> {
        self.push_entry(entry.into_route_entry(), 0)
    }

    /// Remove the top entry and settle on whatever is now visible.
    ///
    /// On an empty stack the default entry is evaluated instead; it is
    /// notified (or redirected) but never pushed.
    pub fn pop(&mut self) -> Result<NavigationOutcome, NavigationError> {
        let removed = self.stack.pop();
        let current = match self.stack.top() {
            Some(top) => top.clone(),
            None => self.default_entry.clone(),
        };
        debug_log!(
            "pop: removed {:?}, now on '{}' (depth {})",
            removed.as_ref().map(ToString::to_string),
            current,
            self.stack.len()
        );

        match self.resolve_for(&current, 0)? {
            Some(redirect) => self.follow(redirect),
            None => Ok(self.settle(current)),
        }
    }

    /// Overwrite the top entry (or push onto an empty stack).
    pub fn replace(
        &mut self,
        entry: impl IntoRouteEntry,
    ) -> Result<NavigationOutcome, NavigationError> {
        let entry = entry.into_route_entry();
        if self.stack.is_top(&entry) {
            debug_log!("replace: '{}' already on top", entry);
            return Ok(NavigationOutcome::Unchanged);
        }
        route_for(&self.routes, &entry)?;

        let replaced = self.stack.replace_top(entry.clone());
        debug_log!(
            "replace: {:?} → '{}'",
            replaced.as_ref().map(ToString::to_string),
            entry
        );

        match self.resolve_for(&entry, 0)? {
            Some(redirect) => self.follow(redirect),
            None => Ok(self.settle(entry)),
        }
    }

    /// Clear the stack. Routes, store, default entry and notifier are kept
    /// and nothing is notified.
    pub fn reset(&mut self) {
        debug_log!("reset: dropping {} entries", self.stack.len());
        self.stack.clear();
    }

    /// Look below the top. See [`NavigationStack::peek`] for offsets.
    pub fn peek(&self, offset: isize) -> Option<&RouteEntry> {
        self.stack.peek(offset)
    }

    /// Return `true` if `entry` equals the current top by value.
    pub fn is_current_entry(&self, entry: impl IntoRouteEntry) -> bool {
        self.stack.is_top(&entry.into_route_entry())
    }

    /// The current (top) entry.
    pub fn current(&self) -> Option<&RouteEntry> {
        self.stack.top()
    }

    /// Number of entries in history.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Return `true` if history is empty.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// History from bottom to top.
    pub fn entries(&self) -> &[RouteEntry] {
        self.stack.entries()
    }

    /// The configured history bound.
    pub fn max_depth(&self) -> usize {
        self.stack.max_depth()
    }

    /// The notifier, for inspecting queued and last-delivered entries.
    pub fn notifier(&self) -> &ChangeNotifier<S, P> {
        &self.notifier
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn push_entry(
        &mut self,
        entry: RouteEntry,
        depth: usize,
    ) -> Result<NavigationOutcome, NavigationError> {
        if self.stack.is_top(&entry) {
            debug_log!("push: '{}' already on top", entry);
            return Ok(NavigationOutcome::Unchanged);
        }
        route_for(&self.routes, &entry)?;

        self.stack.push(entry.clone());
        debug_log!("push: '{}' (depth {})", entry, self.stack.len());

        match self.resolve_for(&entry, depth)? {
            Some(redirect) => self.follow(redirect),
            None => {
                let evicted = self.stack.trim();
                if evicted > 0 {
                    debug_log!("push: evicted {} oldest entries", evicted);
                }
                Ok(self.settle(entry))
            }
        }
    }

    fn follow(&mut self, redirect: Redirect) -> Result<NavigationOutcome, NavigationError> {
        info_log!(
            "Redirecting to '{}' (hop {})",
            redirect.entry,
            redirect.depth
        );
        self.push_entry(redirect.entry, redirect.depth)
    }

    fn settle(&mut self, entry: RouteEntry) -> NavigationOutcome {
        self.notifier.notify(entry.clone(), &self.routes);
        NavigationOutcome::Settled { entry }
    }

    fn resolve_for(
        &self,
        entry: &RouteEntry,
        depth: usize,
    ) -> Result<Option<Redirect>, NavigationError> {
        let Some(route) = route_for(&self.routes, entry)? else {
            return Ok(None);
        };
        MiddlewareResolver::new(&self.routes, &self.middleware, &self.store)
            .with_redirect_limit(self.redirect_limit)
            .resolve_at(route, entry, depth)
    }
}

impl<S: Default + 'static, P> Default for Router<S, P> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: fmt::Debug + 'static, P> fmt::Debug for Router<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("stack", &self.stack)
            .field("routes", &self.routes)
            .field("middleware", &self.middleware)
            .field("notifier", &self.notifier)
            .field("store", &self.store)
            .field("default_entry", &self.default_entry)
            .field("redirect_limit", &self.redirect_limit)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
