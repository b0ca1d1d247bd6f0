use async_trait::async_trait;
use filmhorizon_models::{MovieDetail, MoviePage};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::error::CatalogError;
use crate::tmdb::api::{self, ApiContext};
use crate::traits::CatalogSource;

/// Client for The Movie Database v3 API.
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    ctx: ApiContext,
}

impl TmdbClient {
    pub fn new(base_url: String, api_key: String, language: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent(concat!("filmhorizon/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with custom settings: {}. Using defaults.", e);
                Client::new()
            });

        Self {
            client: Arc::new(client),
            ctx: ApiContext {
                base_url,
                api_key,
                language,
            },
        }
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn popular(&self, page: u32) -> Result<MoviePage, CatalogError> {
        api::get_popular(&self.client, &self.ctx, page).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, CatalogError> {
        api::search_movies(&self.client, &self.ctx, query, page).await
    }

    async fn movie_detail(&self, id: u64) -> Result<MovieDetail, CatalogError> {
        api::get_movie_detail(&self.client, &self.ctx, id).await
    }
}
