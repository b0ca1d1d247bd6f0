use filmhorizon_catalog::{CatalogError, CatalogSource};
use filmhorizon_models::{MovieDetail, WatchlistEntry};
use tracing::info;

use crate::notify::{NotificationKind, Notifier};
use crate::session::Session;
use crate::state::{Action, AppState};
use crate::store::PersistedStore;

/// Fetch one movie with its cast. Single request, no retry.
pub async fn load_detail(catalog: &dyn CatalogSource, id: u64) -> Result<MovieDetail, CatalogError> {
    catalog.movie_detail(id).await
}

pub fn is_in_watchlist(state: &AppState, movie_id: u64) -> bool {
    state.in_watchlist(movie_id)
}

/// Add or remove `movie` and announce the change. Returns the new membership.
pub fn toggle_watchlist<S: PersistedStore>(
    session: &mut Session<S>,
    movie: &MovieDetail,
    notifier: &mut Notifier,
) -> bool {
    if is_in_watchlist(session.state(), movie.id) {
        remove_from_watchlist(session, movie.id, &movie.title, notifier);
        false
    } else {
        add_to_watchlist(session, WatchlistEntry::from(movie), notifier);
        true
    }
}

/// Save `entry` and announce it. A movie already saved is left as is, quietly.
pub fn add_to_watchlist<S: PersistedStore>(
    session: &mut Session<S>,
    entry: WatchlistEntry,
    notifier: &mut Notifier,
) -> bool {
    if is_in_watchlist(session.state(), entry.id) {
        return false;
    }
    let (id, title) = (entry.id, entry.title.clone());
    session.dispatch(Action::AddMovie(entry));
    notifier.push(format!("{} added to watchlist", title), NotificationKind::Success);
    info!(operation = "watchlist_add", movie_id = id, "Added to watchlist");
    true
}

/// Remove an entry from the watchlist view and announce it.
pub fn remove_from_watchlist<S: PersistedStore>(
    session: &mut Session<S>,
    id: u64,
    title: &str,
    notifier: &mut Notifier,
) {
    session.dispatch(Action::RemoveMovie { id });
    notifier.push(format!("{} removed from watchlist", title), NotificationKind::Error);
    info!(operation = "watchlist_remove", movie_id = id, "Removed from watchlist");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, WATCHLIST_KEY};
    use std::time::Duration;

    fn dune() -> MovieDetail {
        serde_json::from_str(
            r#"{"id": 438631, "title": "Dune", "poster_path": "/d.jpg", "genres": [], "credits": {"cast": []}}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let mut session = Session::new(MemoryStore::new());
        let mut notifier = Notifier::new(Duration::from_millis(3000));
        let movie = dune();

        assert!(toggle_watchlist(&mut session, &movie, &mut notifier));
        assert!(is_in_watchlist(session.state(), 438631));
        assert_eq!(session.state().watchlist[0].poster_path.as_deref(), Some("/d.jpg"));

        assert!(!toggle_watchlist(&mut session, &movie, &mut notifier));
        assert!(!is_in_watchlist(session.state(), 438631));
        assert_eq!(session.store().get_item(WATCHLIST_KEY).as_deref(), Some("[]"));

        let toasts: Vec<(String, NotificationKind)> = notifier
            .active()
            .iter()
            .map(|n| (n.message.clone(), n.kind))
            .collect();
        assert_eq!(
            toasts,
            vec![
                ("Dune added to watchlist".to_string(), NotificationKind::Success),
                ("Dune removed from watchlist".to_string(), NotificationKind::Error),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_from_listing_is_idempotent() {
        let mut session = Session::new(MemoryStore::new());
        let mut notifier = Notifier::new(Duration::from_millis(3000));
        let entry = WatchlistEntry::new(7, "Seven", None);

        assert!(add_to_watchlist(&mut session, entry.clone(), &mut notifier));
        assert!(!add_to_watchlist(&mut session, entry, &mut notifier));
        assert_eq!(session.state().watchlist.len(), 1);
        assert_eq!(notifier.active().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_from_watchlist_view() {
        let mut session = Session::new(MemoryStore::new());
        session.dispatch(Action::AddMovie(WatchlistEntry::new(5, "A", None)));
        session.dispatch(Action::AddMovie(WatchlistEntry::new(9, "B", None)));
        let mut notifier = Notifier::new(Duration::from_millis(3000));

        remove_from_watchlist(&mut session, 5, "A", &mut notifier);
        assert_eq!(session.state().watchlist, vec![WatchlistEntry::new(9, "B", None)]);
        assert_eq!(notifier.active()[0].message, "A removed from watchlist");
    }
}
