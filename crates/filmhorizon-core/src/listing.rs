use filmhorizon_models::{MoviePage, MovieSummary};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Popular,
    Search,
}

/// How a fetched page was folded into a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    Replace,
    Append,
}

/// Accumulated results of one paginated listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    movies: Vec<MovieSummary>,
    total_pages: u32,
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page 1 replaces everything accumulated so far; later pages append in
    /// order. Duplicates are kept if the same page arrives twice.
    pub fn merge(&mut self, page: u32, fetched: MoviePage) -> MergeMode {
        self.total_pages = fetched.total_pages.max(1);
        if page <= 1 {
            self.movies = fetched.results;
            MergeMode::Replace
        } else {
            self.movies.extend(fetched.results);
            MergeMode::Append
        }
    }

    pub fn clear(&mut self) {
        self.movies.clear();
        self.total_pages = 0;
    }

    pub fn movies(&self) -> &[MovieSummary] {
        &self.movies
    }

    /// Total pages reported by the last response; 0 before any response.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Enabled state of the listing's paging buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub current_page: u32,
    pub total_pages: u32,
    pub can_prev: bool,
    pub can_next: bool,
}

impl PaginationControls {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            can_prev: current_page > 1,
            can_next: current_page < total_pages,
        }
    }

    pub fn prev_page(&self) -> Option<u32> {
        self.can_prev.then(|| self.current_page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        self.can_next.then(|| self.current_page + 1)
    }
}
