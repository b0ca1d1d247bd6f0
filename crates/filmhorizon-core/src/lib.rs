pub mod app;
pub mod debounce;
pub mod detail;
pub mod listing;
pub mod notify;
pub mod orchestrator;
pub mod route;
pub mod session;
pub mod state;
pub mod store;

pub use app::{AppContext, ImageResolver};
pub use debounce::Debouncer;
pub use detail::{add_to_watchlist, is_in_watchlist, load_detail, remove_from_watchlist, toggle_watchlist};
pub use listing::{Listing, ListingKind, MergeMode, PaginationControls};
pub use notify::{Notification, NotificationKind, Notifier};
pub use orchestrator::{Applied, FetchOrchestrator, FetchOutcome};
pub use route::Route;
pub use session::Session;
pub use state::{reduce, Action, AppState};
pub use store::{JsonFileStore, MemoryStore, PersistedStore, StoreError, CURRENT_PAGE_KEY, WATCHLIST_KEY};
