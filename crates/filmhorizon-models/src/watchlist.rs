use serde::{Deserialize, Serialize};

use crate::movie::{MovieDetail, MovieSummary};

/// A movie the user wants to track.
///
/// Entries are keyed by `id`; a watchlist never holds two entries with the
/// same id. The serialized shape (`{"id", "title", "poster_path"}`) is what
/// gets persisted under the `watchlist` storage key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl WatchlistEntry {
    pub fn new(id: u64, title: impl Into<String>, poster_path: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path,
        }
    }
}

impl From<&MovieSummary> for WatchlistEntry {
    fn from(movie: &MovieSummary) -> Self {
        Self::new(movie.id, movie.title.clone(), movie.poster_path.clone())
    }
}

impl From<&MovieDetail> for WatchlistEntry {
    fn from(movie: &MovieDetail) -> Self {
        Self::new(movie.id, movie.title.clone(), movie.poster_path.clone())
    }
}
