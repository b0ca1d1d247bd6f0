use filmhorizon_models::WatchlistEntry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::state::{reduce, Action, AppState};
use crate::store::{PersistedStore, CURRENT_PAGE_KEY, WATCHLIST_KEY};

/// Owns [`AppState`] and writes it through to a [`PersistedStore`].
///
/// After every transition the commit hook compares the watchlist and page
/// cursor with their previous values and persists whichever changed,
/// synchronously and without batching.
pub struct Session<S: PersistedStore> {
    state: AppState,
    store: S,
}

impl<S: PersistedStore> Session<S> {
    /// A fresh session with default state. Nothing is read from the store.
    pub fn new(store: S) -> Self {
        Self {
            state: AppState::default(),
            store,
        }
    }

    /// Construct a session and restore the watchlist and page cursor from the store.
    ///
    /// Absent or unparsable values fall back to an empty watchlist and page 1.
    pub fn hydrate(store: S) -> Self {
        let mut session = Self::new(store);

        let saved_watchlist =
            read_json::<Option<Vec<WatchlistEntry>>>(&session.store, WATCHLIST_KEY).flatten();
        let saved_page = read_json::<Option<u32>>(&session.store, CURRENT_PAGE_KEY)
            .flatten()
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        debug!(
            operation = "session_hydrate",
            watchlist = saved_watchlist.as_ref().map(Vec::len).unwrap_or(0),
            page = saved_page,
            "Restoring persisted session"
        );

        session.dispatch(Action::LoadWatchlist(saved_watchlist));
        session.dispatch(Action::SetCurrentPage(saved_page));
        session
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one action and run the commit hook.
    pub fn dispatch(&mut self, action: Action) -> &AppState {
        let name = action.name();
        let previous_watchlist = self.state.watchlist.clone();
        let previous_page = self.state.current_page;

        reduce(&mut self.state, action);

        let watchlist_changed = self.state.watchlist != previous_watchlist;
        let page_changed = self.state.current_page != previous_page;
        debug!(
            operation = "dispatch",
            action = name,
            watchlist_changed,
            page_changed,
            "Applied action"
        );

        self.on_commit(watchlist_changed, page_changed);
        &self.state
    }

    fn on_commit(&mut self, watchlist_changed: bool, page_changed: bool) {
        if watchlist_changed {
            write_json(&mut self.store, WATCHLIST_KEY, &self.state.watchlist);
        }
        if page_changed {
            write_json(&mut self.store, CURRENT_PAGE_KEY, &self.state.current_page);
        }
    }
}

/// Parse the value under `key`. Absent keys and parse failures both yield `None`.
fn read_json<T: DeserializeOwned>(store: &impl PersistedStore, key: &str) -> Option<T> {
    let raw = store.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring unreadable stored value for '{}': {}", key, e);
            None
        }
    }
}

fn write_json<T: Serialize + ?Sized>(store: &mut impl PersistedStore, key: &str, value: &T) {
    let encoded = match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("Failed to encode '{}' for storage: {}", key, e);
            return;
        }
    };
    if let Err(e) = store.set_item(key, &encoded) {
        warn!("Failed to persist '{}': {}", key, e);
    }
}

#[cfg(test)]
mod tests;
