//! Integration tests for middleware redirects and redirect chains.

mod common;

use common::*;
use route_stack::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn chain_router() -> TestRouter {
    let mut router = router_with_routes(&["c"]);
    router.add_route("a", RouteDefinition::new("a").middleware(redirect_to("b")));
    router.add_route("b", RouteDefinition::new("b").middleware(redirect_to("c")));
    router
}

#[test]
fn test_redirect_chain_notifies_final_target_once() {
    let mut router = chain_router();
    let seen = record(&mut router);

    let outcome = router.push("a").unwrap();

    assert_eq!(outcome.entry(), Some(&RouteEntry::new("c")));
    assert_eq!(seen_ids(&seen), vec!["c"]);
    assert_eq!(router.current(), Some(&RouteEntry::new("c")));
}

#[test]
fn test_redirect_chain_keeps_origin_beneath_final_target() {
    let mut router = chain_router();
    router.push("a").unwrap();

    // The resolver collapses a → b → c into a single hop to c.
    assert_eq!(stack_ids(&router), vec!["a", "c"]);
    assert_eq!(router.peek(0), Some(&RouteEntry::new("a")));
}

#[test]
fn test_chain_stopping_midway_pushes_intermediate() {
    let mut router = router_with_routes(&["c"]);
    router.add_route("a", RouteDefinition::new("a").middleware(redirect_to("b")));
    // b declares middleware that lets the entry through.
    router.add_route(
        "b",
        RouteDefinition::new("b").middleware(middleware_fn(|_: &RouteEntry, _: &TestStore| {
            Ok(None)
        })),
    );

    router.push("a").unwrap();
    assert_eq!(stack_ids(&router), vec!["a", "b"]);
}

#[test]
fn test_named_middleware_is_looked_up_when_route_runs() {
    let mut router = router_with_routes(&["home", "login"]);
    router.add_route(
        "account",
        RouteDefinition::new("account").middleware_named("auth"),
    );

    // Registered after the route was defined.
    router.add_middleware("auth", require_login());
    router.push("account").unwrap();
    assert_eq!(router.current(), Some(&RouteEntry::new("login")));

    // Re-registering the name changes the existing route's behavior.
    router.add_middleware(
        "auth",
        middleware_fn(|_: &RouteEntry, _: &TestStore| Ok(None)),
    );
    router.push("account").unwrap();
    assert_eq!(router.current(), Some(&RouteEntry::new("account")));
}

#[test]
fn test_missing_named_middleware_reports_name() {
    let mut router = router_with_routes(&[]);
    router.add_route(
        "account",
        RouteDefinition::new("account").middleware_named("auth"),
    );

    let err = router.push("account").unwrap_err();
    assert_eq!(
        err,
        NavigationError::MiddlewareNotRegistered {
            name: "auth".to_string()
        }
    );
}

#[test]
fn test_store_drives_redirects() {
    let mut router = router_with_routes(&["login"]);
    router.add_route(
        "account",
        RouteDefinition::new("account").middleware(require_login()),
    );

    router.push("account").unwrap();
    assert_eq!(stack_ids(&router), vec!["account", "login"]);

    router.store_mut().logged_in = true;
    router.push("account").unwrap();
    assert_eq!(stack_ids(&router), vec!["account", "login", "account"]);
}

#[test]
fn test_pop_onto_guarded_entry_redirects_again() {
    let mut router = router_with_routes(&["home", "login"]);
    router.add_route(
        "account",
        RouteDefinition::new("account").middleware(require_login()),
    );
    let seen = record(&mut router);
    router.store_mut().logged_in = true;
    router.push("home").unwrap();
    router.push("account").unwrap();
    router.push("home").unwrap();

    router.store_mut().logged_in = false;
    router.pop().unwrap();

    assert_eq!(stack_ids(&router), vec!["home", "account", "login"]);
    assert_eq!(seen_ids(&seen), vec!["home", "account", "home", "login"]);
}

#[test]
fn test_replace_with_redirect_pushes_target() {
    let mut router = router_with_routes(&["home", "login"]);
    router.add_route(
        "account",
        RouteDefinition::new("account").middleware(require_login()),
    );
    router.push("home").unwrap();

    router.replace("account").unwrap();
    assert_eq!(stack_ids(&router), vec!["account", "login"]);
}

#[test]
fn test_redirect_params_are_carried() {
    let mut router = router_with_routes(&["user"]);
    router.add_route(
        "legacy-user",
        RouteDefinition::new("legacy-user").middleware(middleware_fn(
            |entry: &RouteEntry, _: &TestStore| Ok(Some(entry.with_id("user"))),
        )),
    );

    router
        .push(RouteEntry::new("legacy-user").with_param("id", 9))
        .unwrap();
    assert!(router.is_current_entry(("user", [("id", 9)])));
}

#[test]
fn test_first_redirecting_handler_wins() {
    let later = Arc::new(AtomicUsize::new(0));
    let counter = later.clone();
    let mut router = router_with_routes(&["first", "second"]);
    router.add_route(
        "gate",
        RouteDefinition::new("gate")
            .middleware(redirect_to("first"))
            .middleware(middleware_fn(move |_: &RouteEntry, _: &TestStore| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Some(RouteEntry::new("second")))
            })),
    );

    router.push("gate").unwrap();
    assert_eq!(router.current(), Some(&RouteEntry::new("first")));
    assert_eq!(later.load(Ordering::SeqCst), 0);
}

#[test]
fn test_redirect_cycle_hits_configured_limit() {
    let mut router = router_with_routes(&["home"]).with_redirect_limit(8);
    router.add_route("ping", RouteDefinition::new("ping").middleware(redirect_to("pong")));
    router.add_route("pong", RouteDefinition::new("pong").middleware(redirect_to("ping")));
    let seen = record(&mut router);
    router.push("home").unwrap();

    let err = router.push("ping").unwrap_err();

    assert!(err.is_redirect_limit());
    assert_eq!(router.redirect_limit(), Some(8));
    // The entry that started the cycle was committed before resolution failed.
    assert_eq!(stack_ids(&router), vec!["home", "ping"]);
    assert_eq!(seen_ids(&seen), vec!["home"]);
}

#[test]
fn test_redirect_limit_allows_chains_within_budget() {
    let mut router = chain_router().with_redirect_limit(2);
    router.push("a").unwrap();
    assert_eq!(router.current(), Some(&RouteEntry::new("c")));

    let mut router = chain_router().with_redirect_limit(1);
    let err = router.push("a").unwrap_err();
    assert_eq!(
        err,
        NavigationError::RedirectLimitExceeded {
            depth: 2,
            target: "c".to_string()
        }
    );
}

#[test]
fn test_redirect_to_unregistered_route_fails() {
    let mut router = router_with_routes(&[]);
    router.add_route("a", RouteDefinition::new("a").middleware(redirect_to("missing")));

    let err = router.push("a").unwrap_err();
    assert_eq!(
        err,
        NavigationError::RouteNotRegistered {
            id: "missing".to_string()
        }
    );
}

#[test]
fn test_extend_middleware_registers_shared_handlers() {
    let mut router = router_with_routes(&["login"]);
    let shared: Arc<dyn RouteMiddleware<TestStore>> = Arc::new(require_login());
    router.extend_middleware([("auth", shared.clone()), ("auth-alias", shared)]);
    router.add_route(
        "account",
        RouteDefinition::new("account").middleware_named("auth-alias"),
    );

    router.push("account").unwrap();
    assert_eq!(router.middleware_registry().len(), 2);
    assert_eq!(router.current(), Some(&RouteEntry::new("login")));
}
