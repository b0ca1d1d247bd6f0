use super::*;
use crate::store::{JsonFileStore, MemoryStore, StoreError};

fn entry(id: u64, title: &str) -> WatchlistEntry {
    WatchlistEntry::new(id, title, None)
}

fn stored_watchlist(store: &impl PersistedStore) -> Vec<WatchlistEntry> {
    serde_json::from_str(&store.get_item(WATCHLIST_KEY).unwrap()).unwrap()
}

#[test]
fn test_hydrate_empty_store_uses_defaults() {
    let session = Session::hydrate(MemoryStore::new());
    assert!(session.state().watchlist.is_empty());
    assert_eq!(session.state().current_page, 1);
}

#[test]
fn test_hydrate_restores_watchlist_and_page() {
    let store = MemoryStore::new()
        .with_item(WATCHLIST_KEY, r#"[{"id":5,"title":"A","poster_path":null},{"id":9,"title":"B","poster_path":"/b.jpg"}]"#)
        .with_item(CURRENT_PAGE_KEY, "4");
    let session = Session::hydrate(store);

    assert_eq!(session.state().watchlist.len(), 2);
    assert_eq!(session.state().watchlist[1].poster_path.as_deref(), Some("/b.jpg"));
    assert_eq!(session.state().current_page, 4);
    assert_eq!(session.state().search_query, "");
}

#[test]
fn test_hydrate_keeps_entries_with_missing_fields() {
    let store = MemoryStore::new()
        .with_item(WATCHLIST_KEY, r#"[{"id":5,"title":"A","poster_path":null},{"id":9}]"#);
    let session = Session::hydrate(store);

    assert_eq!(session.state().watchlist.len(), 2);
    assert_eq!(session.state().watchlist[1], entry(9, ""));
    assert!(session.state().in_watchlist(5));
}

#[test]
fn test_hydrate_falls_back_on_garbage() {
    let store = MemoryStore::new()
        .with_item(WATCHLIST_KEY, "{not json")
        .with_item(CURRENT_PAGE_KEY, "\"three\"");
    let session = Session::hydrate(store);
    assert!(session.state().watchlist.is_empty());
    assert_eq!(session.state().current_page, 1);
}

#[test]
fn test_hydrate_null_and_zero_values() {
    let store = MemoryStore::new()
        .with_item(WATCHLIST_KEY, "null")
        .with_item(CURRENT_PAGE_KEY, "0");
    let session = Session::hydrate(store);
    assert!(session.state().watchlist.is_empty());
    assert_eq!(session.state().current_page, 1);
}

#[test]
fn test_remove_writes_through_immediately() {
    let mut session = Session::new(MemoryStore::new());
    session.dispatch(Action::AddMovie(entry(5, "A")));
    session.dispatch(Action::AddMovie(entry(9, "B")));
    assert_eq!(stored_watchlist(session.store()).len(), 2);

    session.dispatch(Action::RemoveMovie { id: 5 });
    assert_eq!(stored_watchlist(session.store()), vec![entry(9, "B")]);
}

#[test]
fn test_duplicate_add_keeps_single_entry() {
    let mut session = Session::new(MemoryStore::new());
    session.dispatch(Action::AddMovie(entry(5, "A")));
    session.dispatch(Action::AddMovie(WatchlistEntry::new(5, "A", None)));
    assert_eq!(session.state().watchlist, vec![entry(5, "A")]);
    assert_eq!(stored_watchlist(session.store()), vec![entry(5, "A")]);
}

#[test]
fn test_load_watchlist_roundtrips_through_store() {
    let list = vec![entry(3, "C"), WatchlistEntry::new(1, "A", Some("/a.jpg".into())), entry(2, "B")];
    let mut session = Session::new(MemoryStore::new());
    session.dispatch(Action::LoadWatchlist(Some(list.clone())));
    assert_eq!(stored_watchlist(session.store()), list);
}

#[test]
fn test_page_changes_persist_and_query_resets() {
    let mut session = Session::new(MemoryStore::new());
    session.dispatch(Action::SetCurrentPage(6));
    assert_eq!(session.store().get_item(CURRENT_PAGE_KEY).as_deref(), Some("6"));

    session.dispatch(Action::SetSearchQuery("dune".into()));
    assert_eq!(session.state().current_page, 1);
    assert_eq!(session.store().get_item(CURRENT_PAGE_KEY).as_deref(), Some("1"));
}

#[test]
fn test_unchanged_state_does_not_write() {
    let mut session = Session::new(MemoryStore::new());
    session.dispatch(Action::SetSearchQuery("x".into()));
    session.dispatch(Action::RemoveMovie { id: 1 });
    assert_eq!(session.store().get_item(WATCHLIST_KEY), None);
    assert_eq!(session.store().get_item(CURRENT_PAGE_KEY), None);
}

struct FailingStore;

impl PersistedStore for FailingStore {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

#[test]
fn test_store_failure_does_not_block_dispatch() {
    let mut session = Session::new(FailingStore);
    session.dispatch(Action::AddMovie(entry(1, "A")));
    session.dispatch(Action::SetCurrentPage(2));
    assert_eq!(session.state().watchlist.len(), 1);
    assert_eq!(session.state().current_page, 2);
}

#[test]
fn test_file_store_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let mut session = Session::hydrate(JsonFileStore::open(&path).unwrap());
        session.dispatch(Action::AddMovie(entry(5, "A")));
        session.dispatch(Action::AddMovie(entry(9, "B")));
        session.dispatch(Action::SetCurrentPage(3));
    }

    let session = Session::hydrate(JsonFileStore::open(&path).unwrap());
    assert_eq!(session.state().watchlist, vec![entry(5, "A"), entry(9, "B")]);
    assert_eq!(session.state().current_page, 3);
}
