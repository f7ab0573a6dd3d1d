//! Shared fixtures for integration tests.
//!
//! Builds routers over a small test store, records notifications, and
//! provides redirecting middleware.

#![allow(dead_code)]

use route_stack::*;
use std::sync::{Arc, Mutex};

/// Store used by the integration routers.
#[derive(Debug, Default)]
pub struct TestStore {
    pub logged_in: bool,
}

/// Payload carried by every test route: the route's own id.
pub type TestRouter = Router<TestStore, &'static str>;

/// Notifications seen by a recording subscriber, as `(entry, payload)`.
pub type Seen = Arc<Mutex<Vec<(RouteEntry, Option<&'static str>)>>>;

/// Initialize `env_logger` once so `RUST_LOG=debug` shows router logs.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Create a router with a pass-through route for each id.
pub fn router_with_routes(ids: &[&'static str]) -> TestRouter {
    init_logging();
    let mut router = TestRouter::default();
    for id in ids {
        router.add_route(*id, RouteDefinition::new(*id));
    }
    router
}

/// Build a subscriber that records every notification into `seen`.
pub fn recorder(
    seen: &Seen,
) -> impl FnMut(&RouteEntry, Option<&RouteDefinition<TestStore, &'static str>>) + Send + 'static
{
    let sink = seen.clone();
    move |entry: &RouteEntry, route: Option<&RouteDefinition<TestStore, &'static str>>| {
        sink.lock()
            .unwrap()
            .push((entry.clone(), route.map(|r| *r.payload())));
    }
}

/// Install a recording subscriber and return what it records.
pub fn record(router: &mut TestRouter) -> Seen {
    let seen = Seen::default();
    router.set_subscriber(recorder(&seen));
    seen
}

/// Ids of the recorded notifications, in order.
pub fn seen_ids(seen: &Seen) -> Vec<String> {
    seen.lock()
        .unwrap()
        .iter()
        .map(|(entry, _)| entry.id().unwrap_or("<none>").to_string())
        .collect()
}

/// Ids of the router's history, bottom to top.
pub fn stack_ids(router: &TestRouter) -> Vec<String> {
    router
        .entries()
        .iter()
        .map(|entry| entry.id().unwrap_or("<none>").to_string())
        .collect()
}

/// Middleware that always redirects to `target`.
pub fn redirect_to(target: &'static str) -> impl RouteMiddleware<TestStore> {
    middleware_fn(move |_: &RouteEntry, _: &TestStore| Ok(Some(RouteEntry::new(target))))
        .named(format!("redirect-to-{target}"))
}

/// Middleware that redirects to `login` unless the store says logged in.
pub fn require_login() -> impl RouteMiddleware<TestStore> {
    middleware_fn(|_: &RouteEntry, store: &TestStore| {
        Ok((!store.logged_in).then(|| RouteEntry::new("login")))
    })
    .named("require-login")
}
