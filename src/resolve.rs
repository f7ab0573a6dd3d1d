//! Middleware resolution and redirect chains.
//!
//! [`MiddlewareResolver`] answers one question: "if this entry became the
//! top of the stack, where would middleware send us instead?"
//!
//! Given a route and an entry it:
//!
//! 1. returns `None` if the route declares no middleware;
//! 2. runs the declared handlers in order (named ones are looked up in the
//!    [`MiddlewareRegistry`] at this moment) and stops at the first redirect;
//! 3. if there was a redirect, looks up the target's route. When that route
//!    declares middleware too, resolution recurses on the target and the
//!    deepest redirect wins; otherwise the target itself is returned.
//!
//! The recursion follows the redirect graph, so a chain that comes back to
//! a route it already visited never terminates on its own. Routers built
//! with [`Router::with_redirect_limit`](crate::Router::with_redirect_limit)
//! give the resolver a hop budget; without one the chain is followed
//! unconditionally.

use crate::entry::RouteEntry;
use crate::error::NavigationError;
use crate::middleware::MiddlewareRegistry;
use crate::route::{RouteDefinition, RouteRegistry};
use crate::{debug_log, error_log, trace_log, warn_log};

/// Find the route owning `entry`.
///
/// Entries without an id have no owner and resolve to `Ok(None)`; an id
/// with no registered route is an error.
pub(crate) fn route_for<'r, S: 'static, P>(
    routes: &'r RouteRegistry<S, P>,
    entry: &RouteEntry,
) -> Result<Option<&'r RouteDefinition<S, P>>, NavigationError> {
    match entry.id() {
        None => Ok(None),
        Some(id) => match routes.get(id) {
            Some(route) => Ok(Some(route)),
            None => {
                warn_log!("No route registered for '{}'", id);
                Err(NavigationError::RouteNotRegistered { id: id.to_string() })
            }
        },
    }
}

/// A redirect produced by resolution together with the hop count it took.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Redirect {
    pub(crate) entry: RouteEntry,
    pub(crate) depth: usize,
}

/// Runs route middleware against the registries and store of one router.
pub struct MiddlewareResolver<'a, S, P = ()> {
    routes: &'a RouteRegistry<S, P>,
    middleware: &'a MiddlewareRegistry<S>,
    store: &'a S,
    redirect_limit: Option<usize>,
}

impl<'a, S: 'static, P> MiddlewareResolver<'a, S, P> {
    /// Create a resolver with no redirect limit.
    pub fn new(
        routes: &'a RouteRegistry<S, P>,
        middleware: &'a MiddlewareRegistry<S>,
        store: &'a S,
    ) -> Self {
        Self {
            routes,
            middleware,
            store,
            redirect_limit: None,
        }
    }

    /// Fail with [`NavigationError::RedirectLimitExceeded`] once a
    /// resolution needs more than `limit` hops.
    pub fn with_redirect_limit(mut self, limit: Option<usize>) -> Self {
        self.redirect_limit = limit;
        self
    }

    /// Resolve middleware for `entry`, owned by `route`.
    ///
    /// Returns the redirect target, or `None` when the entry may settle.
    pub fn resolve(
        &self,
        route: &RouteDefinition<S, P>,
        entry: &RouteEntry,
    ) -> Result<Option<RouteEntry>, NavigationError> {
        Ok(self.resolve_at(route, entry, 0)?.map(|redirect| redirect.entry))
    }

    /// Same as [`resolve`](Self::resolve), starting `depth` hops into a chain.
    pub(crate) fn resolve_at(
        &self,
        route: &RouteDefinition<S, P>,
        entry: &RouteEntry,
        depth: usize,
    ) -> Result<Option<Redirect>, NavigationError> {
        let Some(candidate) = self.run_chain(route, entry)? else {
            return Ok(None);
        };

        let depth = depth + 1;
        if let Some(limit) = self.redirect_limit {
            if depth > limit {
                error_log!(
                    "Redirect limit {} exceeded (depth {}) resolving '{}' → '{}'",
                    limit,
                    depth,
                    entry,
                    candidate
                );
                return Err(NavigationError::RedirectLimitExceeded {
                    depth,
                    target: candidate.to_string(),
                });
            }
        }
        debug_log!("'{}' redirects to '{}' (depth {})", entry, candidate, depth);

        match route_for(self.routes, &candidate)? {
            Some(next) if next.has_middleware() => {
                let deeper = self.resolve_at(next, &candidate, depth)?;
                Ok(Some(deeper.unwrap_or(Redirect {
                    entry: candidate,
                    depth,
                })))
            }
            _ => Ok(Some(Redirect {
                entry: candidate,
                depth,
            })),
        }
    }

    /// Run the route's handlers in order; the first redirect wins.
    fn run_chain(
        &self,
        route: &RouteDefinition<S, P>,
        entry: &RouteEntry,
    ) -> Result<Option<RouteEntry>, NavigationError> {
        let Some(list) = route.middleware_list() else {
            return Ok(None);
        };

        for element in list {
            let handler = element.resolve(self.middleware)?;
            let outcome = handler.handle(entry, self.store)?;
            trace_log!(
                "Middleware '{}' on '{}' → {:?}",
                handler.name(),
                entry,
                outcome.as_ref().map(ToString::to_string)
            );
            if outcome.is_some() {
                return Ok(outcome);
            }
        }

        Ok(None)
    }
}

// ============================================================================
// Tests
// ============================================================================
