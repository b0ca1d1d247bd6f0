use async_trait::async_trait;
use filmhorizon_models::{MovieDetail, MoviePage};

use crate::error::CatalogError;

/// Read-only access to a paginated movie catalog.
///
/// Implementations perform exactly one request per call: no retry and no caching.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// One page of the popular listing. Pages start at 1.
    async fn popular(&self, page: u32) -> Result<MoviePage, CatalogError>;

    /// One page of search results for `query`.
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, CatalogError>;

    /// Full detail for one movie, including its cast.
    async fn movie_detail(&self, id: u64) -> Result<MovieDetail, CatalogError>;
}
