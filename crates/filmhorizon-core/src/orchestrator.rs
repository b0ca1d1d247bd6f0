use filmhorizon_catalog::{CatalogError, CatalogSource};
use filmhorizon_models::{MoviePage, MovieSummary};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::debounce::Debouncer;
use crate::listing::{Listing, ListingKind, MergeMode, PaginationControls};
use crate::state::AppState;

/// A finished catalog request, waiting to be folded into a listing.
#[derive(Debug)]
pub enum FetchOutcome {
    Popular {
        page: u32,
        result: Result<MoviePage, CatalogError>,
    },
    Search {
        query: String,
        page: u32,
        result: Result<MoviePage, CatalogError>,
    },
    /// The debounce elapsed on an empty query; no request was made
    SearchCleared,
}

/// What [`FetchOrchestrator::apply`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Merged {
        kind: ListingKind,
        mode: MergeMode,
        count: usize,
    },
    /// The request failed; the listing keeps its previous results
    Failed { kind: ListingKind },
    Cleared,
}

/// Decides which catalog call the current `(search_query, current_page)` needs.
///
/// Search requests are debounced; popular requests fire as soon as the page
/// changes while no search is active. Responses come back through a channel and
/// are applied in arrival order by [`apply`](Self::apply). An in-flight request is
/// never aborted, and there is no sequence guard: a slow response for an older
/// page is still merged when it lands.
pub struct FetchOrchestrator {
    catalog: Arc<dyn CatalogSource>,
    debouncer: Debouncer,
    popular: Listing,
    search: Listing,
    search_query: String,
    current_page: u32,
    observed: Option<(String, u32)>,
    /// Page of the last popular request
    popular_page: Option<u32>,
    outcomes_tx: UnboundedSender<FetchOutcome>,
    outcomes_rx: UnboundedReceiver<FetchOutcome>,
}

impl FetchOrchestrator {
    pub fn new(catalog: Arc<dyn CatalogSource>, debounce: Duration) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            catalog,
            debouncer: Debouncer::new(debounce),
            popular: Listing::new(),
            search: Listing::new(),
            search_query: String::new(),
            current_page: 1,
            observed: None,
            popular_page: None,
            outcomes_tx,
            outcomes_rx,
        }
    }

    /// React to the latest state. Call after every dispatch; unchanged
    /// `(search_query, current_page)` pairs are ignored.
    pub fn observe(&mut self, state: &AppState) {
        let key = (state.search_query.clone(), state.current_page);
        let previous = self.observed.replace(key.clone());
        if previous.as_ref() == Some(&key) {
            return;
        }

        let (query, page) = key;
        self.search_query = query.clone();
        self.current_page = page;

        // Also covers a cleared search: the query reset the cursor to 1 while
        // the popular listing may still hold later pages.
        if query.is_empty() && self.popular_page != Some(page) {
            self.fetch_popular_now(page);
        }
        self.schedule_search(query, page);
    }

    fn schedule_search(&mut self, query: String, page: u32) {
        let catalog = self.catalog.clone();
        let tx = self.outcomes_tx.clone();
        debug!(
            operation = "search_scheduled",
            query = %query,
            page,
            delay_ms = self.debouncer.delay().as_millis() as u64,
            "Debouncing search"
        );

        self.debouncer.schedule(async move {
            if query.trim().is_empty() {
                let _ = tx.send(FetchOutcome::SearchCleared);
                return;
            }
            let result = catalog.search(&query, page).await;
            let _ = tx.send(FetchOutcome::Search { query, page, result });
        });
    }

    /// Request a popular page right away.
    pub fn fetch_popular_now(&mut self, page: u32) {
        self.popular_page = Some(page);
        let catalog = self.catalog.clone();
        let tx = self.outcomes_tx.clone();
        debug!(operation = "popular_fetch", page, "Fetching popular listing");
        tokio::spawn(async move {
            let result = catalog.popular(page).await;
            let _ = tx.send(FetchOutcome::Popular { page, result });
        });
    }

    /// Request a search page right away, bypassing the debounce.
    pub fn fetch_search_now(&mut self, query: &str, page: u32) {
        self.debouncer.cancel();
        let catalog = self.catalog.clone();
        let tx = self.outcomes_tx.clone();
        let query = query.to_string();
        tokio::spawn(async move {
            let result = catalog.search(&query, page).await;
            let _ = tx.send(FetchOutcome::Search { query, page, result });
        });
    }

    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Wait for the next finished request.
    pub async fn next_outcome(&mut self) -> Option<FetchOutcome> {
        self.outcomes_rx.recv().await
    }

    /// Apply every outcome that has already arrived, without waiting.
    pub fn apply_ready(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            applied.push(self.apply(outcome));
        }
        applied
    }

    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        match outcome {
            FetchOutcome::Popular { page, result } => {
                Self::merge_into(&mut self.popular, ListingKind::Popular, page, result)
            }
            FetchOutcome::Search { query, page, result } => {
                if query != self.search_query {
                    debug!(query = %query, current = %self.search_query, "Applying search response for an earlier query");
                }
                Self::merge_into(&mut self.search, ListingKind::Search, page, result)
            }
            FetchOutcome::SearchCleared => {
                self.search.clear();
                Applied::Cleared
            }
        }
    }

    fn merge_into(
        listing: &mut Listing,
        kind: ListingKind,
        page: u32,
        result: Result<MoviePage, CatalogError>,
    ) -> Applied {
        match result {
            Ok(fetched) => {
                let count = fetched.results.len();
                let mode = listing.merge(page, fetched);
                info!(
                    operation = "listing_merged",
                    listing = ?kind,
                    page,
                    count,
                    mode = ?mode,
                    total = listing.movies().len(),
                    "Merged catalog page"
                );
                Applied::Merged { kind, mode, count }
            }
            Err(e) => {
                warn!(listing = ?kind, page, "Error fetching movies: {}", e);
                Applied::Failed { kind }
            }
        }
    }

    pub fn active_kind(&self) -> ListingKind {
        if self.search_query.is_empty() {
            ListingKind::Popular
        } else {
            ListingKind::Search
        }
    }

    pub fn listing(&self, kind: ListingKind) -> &Listing {
        match kind {
            ListingKind::Popular => &self.popular,
            ListingKind::Search => &self.search,
        }
    }

    /// The popular listing when no search is active, otherwise the search results.
    pub fn displayed_movies(&self) -> &[MovieSummary] {
        self.listing(self.active_kind()).movies()
    }

    pub fn total_pages(&self) -> u32 {
        self.listing(self.active_kind()).total_pages()
    }

    pub fn pagination(&self) -> PaginationControls {
        PaginationControls::new(self.current_page, self.total_pages())
    }
}
