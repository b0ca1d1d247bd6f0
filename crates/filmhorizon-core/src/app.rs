use anyhow::Result;
use filmhorizon_catalog::{CatalogSource, TmdbClient};
use filmhorizon_config::{CatalogConfig, Config, PathManager};
use filmhorizon_models::{ImageRef, PlaceholderKind};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::notify::Notifier;
use crate::orchestrator::FetchOrchestrator;
use crate::session::Session;
use crate::store::JsonFileStore;

/// Resolves poster and cast image URLs from the catalog settings.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    base_url: String,
    size: String,
}

impl ImageResolver {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            base_url: config.image_base_url.clone(),
            size: config.poster_size.clone(),
        }
    }

    pub fn poster(&self, path: Option<&str>) -> ImageRef {
        ImageRef::resolve(&self.base_url, &self.size, path, PlaceholderKind::Poster)
    }

    pub fn profile(&self, path: Option<&str>) -> ImageRef {
        ImageRef::resolve(&self.base_url, &self.size, path, PlaceholderKind::Cast)
    }
}

/// Everything one CLI session needs, wired from config.
pub struct AppContext {
    pub catalog: Arc<dyn CatalogSource>,
    pub session: Session<JsonFileStore>,
    pub orchestrator: FetchOrchestrator,
    pub notifier: Notifier,
    pub images: ImageResolver,
}

impl AppContext {
    pub fn build(config: &Config, paths: &PathManager, api_key: String) -> Result<Self> {
        config.validate()?;
        paths.ensure_directories()?;

        let catalog: Arc<dyn CatalogSource> = Arc::new(TmdbClient::new(
            config.catalog.base_url.clone(),
            api_key,
            config.catalog.language.clone(),
            Duration::from_secs(config.catalog.timeout_secs),
        ));
        Self::with_catalog(config, paths, catalog)
    }

    /// Wire the context around an existing catalog implementation.
    pub fn with_catalog(config: &Config, paths: &PathManager, catalog: Arc<dyn CatalogSource>) -> Result<Self> {
        let store = JsonFileStore::open(&paths.storage_file())?;
        debug!(
            operation = "context_build",
            catalog = catalog.source_name(),
            "Opened storage at {:?}",
            store.path()
        );
        let session = Session::hydrate(store);

        let orchestrator = FetchOrchestrator::new(catalog.clone(), Duration::from_millis(config.fetch.debounce_ms));

        Ok(Self {
            catalog,
            session,
            orchestrator,
            notifier: Notifier::new(Duration::from_millis(config.notifications.display_ms)),
            images: ImageResolver::new(&config.catalog),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Action;
    use filmhorizon_models::WatchlistEntry;

    #[test]
    fn test_image_resolver_uses_config() {
        let mut config = CatalogConfig::default();
        config.poster_size = "w342".to_string();
        let images = ImageResolver::new(&config);
        assert_eq!(
            images.poster(Some("/p.jpg")),
            ImageRef::Remote("https://image.tmdb.org/t/p/w342/p.jpg".to_string())
        );
        assert_eq!(images.profile(None), ImageRef::Placeholder(PlaceholderKind::Cast));
    }

    #[tokio::test]
    async fn test_context_hydrates_from_storage_file() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::with_base(dir.path().to_path_buf());
        let config = Config::default();

        {
            let mut ctx = AppContext::build(&config, &paths, "key".to_string()).unwrap();
            ctx.session.dispatch(Action::AddMovie(WatchlistEntry::new(1, "A", None)));
            ctx.session.dispatch(Action::SetCurrentPage(5));
        }

        let ctx = AppContext::build(&config, &paths, "key".to_string()).unwrap();
        assert_eq!(ctx.session.state().watchlist.len(), 1);
        assert_eq!(ctx.session.state().current_page, 5);
        assert!(paths.storage_file().exists());
    }
}
