use filmhorizon_models::{MovieSummary, WatchlistEntry};

/// Session state shared by every view. All mutation goes through [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Insertion-ordered, at most one entry per id
    pub watchlist: Vec<WatchlistEntry>,
    /// Empty means no active search: the popular listing is shown
    pub search_query: String,
    /// Page cursor for whichever listing is active, always >= 1
    pub current_page: u32,
    /// Retained for compatibility; nothing reads or produces it
    pub filtered_movies: Vec<MovieSummary>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            watchlist: Vec::new(),
            search_query: String::new(),
            current_page: 1,
            filtered_movies: Vec::new(),
        }
    }
}

impl AppState {
    pub fn in_watchlist(&self, id: u64) -> bool {
        self.watchlist.iter().any(|m| m.id == id)
    }

    pub fn is_searching(&self) -> bool {
        !self.search_query.is_empty()
    }
}

/// The closed set of state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append unless an entry with the same id exists
    AddMovie(WatchlistEntry),
    RemoveMovie { id: u64 },
    /// Replace the watchlist; `None` resets it to empty
    LoadWatchlist(Option<Vec<WatchlistEntry>>),
    /// Set the query and restart paging at 1
    SetSearchQuery(String),
    SetFilteredMovies(Vec<MovieSummary>),
    SetCurrentPage(u32),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddMovie(_) => "addMovie",
            Action::RemoveMovie { .. } => "removeMovie",
            Action::LoadWatchlist(_) => "loadWatchlist",
            Action::SetSearchQuery(_) => "setSearchQuery",
            Action::SetFilteredMovies(_) => "setFilteredMovies",
            Action::SetCurrentPage(_) => "setCurrentPage",
        }
    }
}

/// Apply `action` to `state`. Every transition is total.
pub fn reduce(state: &mut AppState, action: Action) {
    match action {
        Action::AddMovie(entry) => {
            if !state.in_watchlist(entry.id) {
                state.watchlist.push(entry);
            }
        }
        Action::RemoveMovie { id } => {
            state.watchlist.retain(|m| m.id != id);
        }
        Action::LoadWatchlist(entries) => {
            let mut watchlist: Vec<WatchlistEntry> = Vec::new();
            // Later duplicates are dropped so the id-set invariant survives bad input
            for entry in entries.unwrap_or_default() {
                if !watchlist.iter().any(|m| m.id == entry.id) {
                    watchlist.push(entry);
                }
            }
            state.watchlist = watchlist;
        }
        Action::SetSearchQuery(query) => {
            state.search_query = query;
            state.current_page = 1;
        }
        Action::SetFilteredMovies(movies) => {
            state.filtered_movies = movies;
        }
        Action::SetCurrentPage(page) => {
            state.current_page = page.max(1);
        }
    }
}
