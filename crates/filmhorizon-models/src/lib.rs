pub mod image;
pub mod movie;
pub mod watchlist;

pub use image::{ImageRef, PlaceholderKind};
pub use movie::{CastMember, Credits, Genre, MovieDetail, MoviePage, MovieSummary};
pub use watchlist::WatchlistEntry;
