use super::*;

fn state(next: &str) -> NavState {
    NavState { next_path: next.to_owned() }
}

// =============================================================================
// history
// =============================================================================

#[test]
fn starts_at_initial_path() {
    let nav = Navigator::new("/");
    assert_eq!(nav.current(), Location::new("/"));
    assert_eq!(nav.depth(), 1);
}

#[test]
fn push_changes_current_location() {
    let nav = Navigator::new("/");
    nav.push("/person");
    assert_eq!(nav.current().path, "/person");
    assert_eq!(nav.depth(), 2);
}

#[test]
fn replace_keeps_depth() {
    let nav = Navigator::new("/");
    nav.push("/person");
    nav.replace(Location::with_state("/register", state("/person")));
    assert_eq!(nav.depth(), 2);
    assert_eq!(nav.current(), Location::with_state("/register", state("/person")));
}

#[test]
fn back_returns_to_previous_entry() {
    let nav = Navigator::new("/login");
    nav.push("/register");
    assert!(nav.back());
    assert_eq!(nav.current().path, "/login");
}

#[test]
fn back_at_first_entry_stays_put() {
    let nav = Navigator::new("/login");
    assert!(!nav.back());
    assert_eq!(nav.current().path, "/login");
}

#[test]
fn clones_share_history() {
    let nav = Navigator::new("/");
    let callback_handle = nav.clone();
    callback_handle.push("/compare");
    assert_eq!(nav.current().path, "/compare");
}

#[test]
fn generation_counts_notifying_writes() {
    let nav = Navigator::new("/");
    assert_eq!(nav.generation(), 0);

    nav.push("/person");
    let replaced = nav.replace(Location::new("/register"));
    assert_eq!(replaced, 2);
    assert!(nav.back());

    assert_eq!(nav.snapshot(), (Location::new("/"), 3));
}

#[test]
fn taking_next_path_keeps_generation() {
    let nav = Navigator::new("/");
    nav.push_with_state("/register", state("/person"));
    let before = nav.generation();
    nav.take_next_path();
    assert_eq!(nav.generation(), before);
}

// =============================================================================
// next path state
// =============================================================================

#[test]
fn take_next_path_consumes_once() {
    let nav = Navigator::new("/");
    nav.push_with_state("/register", state("/person"));

    assert_eq!(nav.take_next_path().as_deref(), Some("/person"));
    assert_eq!(nav.take_next_path(), None);
    assert_eq!(nav.current().state, None);
}

#[test]
fn take_next_path_without_state_is_none() {
    let nav = Navigator::new("/login");
    assert_eq!(nav.take_next_path(), None);
}

#[test]
fn next_path_belongs_to_its_entry() {
    let nav = Navigator::new("/");
    nav.push_with_state("/register", state("/person"));
    nav.push("/login");
    assert_eq!(nav.take_next_path(), None);
    assert!(nav.back());
    assert_eq!(nav.take_next_path().as_deref(), Some("/person"));
}

// =============================================================================
// subscribe
// =============================================================================

#[tokio::test]
async fn subscribers_observe_push() {
    let nav = Navigator::new("/");
    let mut rx = nav.subscribe();

    nav.push("/person");

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().path, "/person");
}

#[tokio::test]
async fn taking_next_path_does_not_notify() {
    let nav = Navigator::new("/");
    nav.push_with_state("/register", state("/person"));
    let mut rx = nav.subscribe();

    nav.take_next_path();

    assert!(!rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().state, None);
}
