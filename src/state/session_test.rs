use super::*;

fn session_with(store: &Arc<MemoryStore>) -> Session {
    Session::new(Arc::clone(store) as Arc<dyn SessionStore>)
}

// =============================================================
// Derived state
// =============================================================

#[test]
fn empty_session_not_logged_in() {
    let session = Session::in_memory();
    assert!(!session.is_logged_in());
    assert!(!session.is_staff());
    assert_eq!(session.snapshot(), SessionSnapshot::default());
}

#[test]
fn staff_flag_ignored_without_token() {
    let store = Arc::new(MemoryStore::new());
    store.set(StorageKey::IsStaff, "true").unwrap();
    let session = session_with(&store);
    assert!(!session.is_staff());
    assert!(!session.snapshot().is_staff);
}

#[test]
fn staff_flag_must_be_exactly_true() {
    let store = Arc::new(MemoryStore::new());
    store.set(StorageKey::AccessToken, "tok").unwrap();
    let session = session_with(&store);

    for raw in ["True", "1", "yes", "false", ""] {
        store.set(StorageKey::IsStaff, raw).unwrap();
        assert!(!session.is_staff(), "flag {raw:?} must not grant staff");
    }
    store.set(StorageKey::IsStaff, "true").unwrap();
    assert!(session.is_staff());
}

#[test]
fn empty_token_counts_as_absent() {
    let store = Arc::new(MemoryStore::new());
    store.set(StorageKey::AccessToken, "").unwrap();
    let session = session_with(&store);
    assert_eq!(session.access_token(), None);
    assert!(!session.is_logged_in());
}

// =============================================================
// sign_in / sign_out
// =============================================================

#[test]
fn sign_in_writes_three_values() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(&store);
    session.sign_in("acc", "ref", true).unwrap();

    assert_eq!(store.get(StorageKey::AccessToken).as_deref(), Some("acc"));
    assert_eq!(store.get(StorageKey::RefreshToken).as_deref(), Some("ref"));
    assert_eq!(store.get(StorageKey::IsStaff).as_deref(), Some("true"));
    assert_eq!(session.snapshot(), SessionSnapshot { logged_in: true, is_staff: true });
}

#[test]
fn sign_in_non_staff_writes_false_string() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(&store);
    session.sign_in("acc", "ref", false).unwrap();
    assert_eq!(store.get(StorageKey::IsStaff).as_deref(), Some("false"));
    assert!(!session.is_staff());
}

#[test]
fn sign_out_twice_matches_once() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(&store);
    session.sign_in("acc", "ref", true).unwrap();

    session.sign_out().unwrap();
    let once: Vec<Option<String>> = StorageKey::ALL.iter().map(|k| store.get(*k)).collect();
    session.sign_out().unwrap();
    let twice: Vec<Option<String>> = StorageKey::ALL.iter().map(|k| store.get(*k)).collect();

    assert_eq!(once, vec![None, None, None]);
    assert_eq!(once, twice);
}

#[test]
fn replace_access_token_keeps_refresh() {
    let store = Arc::new(MemoryStore::new());
    let session = session_with(&store);
    session.sign_in("old", "ref", false).unwrap();
    session.replace_access_token("new", true).unwrap();

    assert_eq!(session.access_token().as_deref(), Some("new"));
    assert_eq!(session.refresh_token().as_deref(), Some("ref"));
    assert!(session.is_staff());
}

// =============================================================
// Change notification
// =============================================================

#[test]
fn subscribers_observe_sign_in_and_out() {
    let session = Session::in_memory();
    let mut rx = session.subscribe();
    assert!(!rx.has_changed().unwrap());

    session.sign_in("acc", "ref", false).unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), SessionSnapshot { logged_in: true, is_staff: false });

    session.sign_out().unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), SessionSnapshot::default());
}

#[test]
fn redundant_sign_out_does_not_notify() {
    let session = Session::in_memory();
    let rx = session.subscribe();
    session.sign_out().unwrap();
    assert!(!rx.has_changed().unwrap());
}

#[test]
fn clones_share_store_and_channel() {
    let session = Session::in_memory();
    let other = session.clone();
    let rx = other.subscribe();
    session.sign_in("acc", "ref", false).unwrap();
    assert!(other.is_logged_in());
    assert!(rx.has_changed().unwrap());
}
