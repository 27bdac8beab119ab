use super::*;
use crate::nav::navigator::NavState;
use crate::session::{MemoryStorage, SessionStore};
use std::sync::Arc;

fn router_at(initial: &str) -> (SessionStore, Router) {
    let session = SessionStore::open(Arc::new(MemoryStorage::new()));
    let router = Router::new(RouteTable::standard(), RouteGuard::require_auth(session.clone()), Navigator::new(initial));
    (session, router)
}

fn next(path: &str) -> Option<NavState> {
    Some(NavState { next_path: path.to_owned() })
}

// =============================================================================
// RouteTable
// =============================================================================

#[test]
fn standard_table_protects_only_person() {
    let table = RouteTable::standard();
    assert!(table.is_protected("/person"));
    assert!(!table.is_protected("/login"));
    assert!(!table.is_protected("/register"));
    assert!(!table.is_protected("/"));
    assert!(!table.is_protected("/nowhere"));
}

#[test]
fn lookup_ignores_query_and_trailing_slash() {
    let table = RouteTable::standard();
    assert_eq!(table.lookup("/person/").map(|r| r.path.as_str()), Some("/person"));
    assert_eq!(table.lookup("/login?from=mail").map(|r| r.path.as_str()), Some("/login"));
    assert_eq!(table.lookup("").map(|r| r.path.as_str()), Some("/"));
}

#[test]
fn redeclaring_a_path_replaces_it() {
    let table = RouteTable::standard().view("/person", "public-person");
    assert!(!table.is_protected("/person"));
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn anonymous_protected_navigation_redirects_to_registration() {
    let (_, router) = router_at("/login");

    let resolution = router.push("/person");

    assert_eq!(resolution.view(), Some("register"));
    assert_eq!(resolution.location(), &Location { path: "/register".to_owned(), state: next("/person") });
    assert_eq!(router.navigator().current(), *resolution.location());
}

#[test]
fn guard_redirect_replaces_history_entry() {
    let (_, router) = router_at("/login");
    router.push("/person");
    assert_eq!(router.navigator().depth(), 2);
    assert!(router.navigator().back());
    assert_eq!(router.navigator().current().path, "/login");
}

#[test]
fn unprotected_paths_never_redirect() {
    let (_, router) = router_at("/");
    for (path, view) in [("/login", "login"), ("/register", "register")] {
        let resolution = router.push(path);
        assert_eq!(resolution.view(), Some(view));
        assert_eq!(resolution.location(), &Location::new(path));
    }
}

#[test]
fn authenticated_protected_navigation_renders() {
    let (session, router) = router_at("/login");
    session.set().unwrap();

    let resolution = router.push("/person");

    assert_eq!(resolution, Resolution::Render { view: "person", location: Location::new("/person") });
}

#[test]
fn root_redirects_through_guard() {
    let (session, router) = router_at("/");
    assert_eq!(router.resolve().location(), &Location { path: "/register".to_owned(), state: next("/person") });

    session.set().unwrap();
    assert_eq!(router.push("/").location(), &Location::new("/person"));
}

#[test]
fn unknown_path_is_not_found() {
    let (_, router) = router_at("/");
    assert_eq!(router.push("/nope"), Resolution::NotFound { location: Location::new("/nope") });
}

#[test]
fn redirect_cycle_is_bounded() {
    let session = SessionStore::open(Arc::new(MemoryStorage::new()));
    let table = RouteTable::empty().redirect("/a", "/b").redirect("/b", "/a");
    let router = Router::new(table, RouteGuard::require_auth(session), Navigator::new("/a"));
    assert!(matches!(router.resolve(), Resolution::RedirectLoop { .. }));
}

#[test]
fn session_cleared_mid_flight_applies_on_next_navigation() {
    let (session, router) = router_at("/login");
    session.set().unwrap();
    assert_eq!(router.push("/person").view(), Some("person"));

    session.clear().unwrap();

    assert_eq!(router.push("/person").view(), Some("register"));
}

// =============================================================================
// resume
// =============================================================================

#[test]
fn resume_returns_to_next_path_after_login() {
    let (session, router) = router_at("/");
    router.push("/person");
    session.set().unwrap();

    let resolution = router.resume();

    assert_eq!(resolution, Resolution::Render { view: "person", location: Location::new("/person") });
}

#[test]
fn resume_without_next_path_uses_default() {
    let (session, router) = router_at("/login");
    session.set().unwrap();
    assert_eq!(router.resume().location().path, DEFAULT_PROTECTED_ROUTE);
}

#[test]
fn resume_while_anonymous_is_redirected_again() {
    let (_, router) = router_at("/");
    router.push("/person");
    let resolution = router.resume();
    assert_eq!(resolution.view(), Some("register"));
    assert_eq!(resolution.location().state, next("/person"));
}

// =============================================================================
// follow
// =============================================================================

#[tokio::test]
async fn follow_resolves_pushes_from_other_handles() {
    let (_, router) = router_at("/login");
    let callback_nav = router.navigator().clone();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let task = tokio::spawn({
        let router = router.clone();
        async move {
            router
                .follow(move |resolution| {
                    let _ = tx.send(resolution);
                })
                .await;
        }
    });

    assert_eq!(rx.recv().await.unwrap().view(), Some("login"));

    callback_nav.push("/person");
    let resolution = rx.recv().await.unwrap();
    assert_eq!(resolution.view(), Some("register"));
    assert_eq!(resolution.location().state, next("/person"));

    task.abort();
}

#[tokio::test]
async fn follow_resolves_pushes_made_inside_the_callback() {
    let (_, router) = router_at("/login");
    let callback_nav = router.navigator().clone();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let task = tokio::spawn({
        let router = router.clone();
        async move {
            let mut first = true;
            router
                .follow(move |resolution| {
                    if first {
                        first = false;
                        callback_nav.push("/person");
                    }
                    let _ = tx.send(resolution);
                })
                .await;
        }
    });

    assert_eq!(rx.recv().await.unwrap().view(), Some("login"));
    let resolution = rx.recv().await.unwrap();
    assert_eq!(resolution.view(), Some("register"));
    assert_eq!(resolution.location().state, next("/person"));

    task.abort();
}

#[tokio::test]
async fn follow_ignores_its_own_redirects() {
    let (_, router) = router_at("/");
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let task = tokio::spawn({
        let router = router.clone();
        async move {
            router
                .follow(move |resolution| {
                    let _ = tx.send(resolution);
                })
                .await;
        }
    });

    assert_eq!(rx.recv().await.unwrap().view(), Some("register"));
    tokio::task::yield_now().await;
    assert!(rx.try_recv().is_err());

    router.navigator().push("/login");
    assert_eq!(rx.recv().await.unwrap().view(), Some("login"));

    task.abort();
}
