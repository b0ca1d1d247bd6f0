pub mod browse;
pub mod config;
pub mod listing;
pub mod movie;
pub mod prompts;
pub mod ui;
pub mod watchlist;

use crate::output::Output;
use color_eyre::Result;
use filmhorizon_config::{Config, CredentialStore, PathManager};
use filmhorizon_core::AppContext;
use std::path::PathBuf;

/// Config file contents, or defaults when no file has been written yet.
pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

/// Log file from `[logging].file`, read before logging is up. Interactive
/// sessions fall back to `logs/filmhorizon.log`. A broken config is reported
/// later by the command itself.
pub fn configured_log_file(interactive: bool) -> Option<PathBuf> {
    let paths = PathManager::default();
    Config::load_or_default(&paths.config_file())
        .ok()
        .and_then(|config| config.logging.file)
        .or_else(|| interactive.then(|| paths.default_log_file()))
}

/// Build the runtime context: config, API key, catalog client and the
/// hydrated session.
pub fn load_context(output: &Output) -> Result<AppContext> {
    let paths = PathManager::default();
    let config = load_config(&paths)?;

    let credentials_file = paths.credentials_file();
    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials.load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let api_key = config.resolve_api_key(&credentials).map_err(|e| {
        output.error("Catalog API key missing. Run 'filmhorizon config init' to set one up.");
        color_eyre::eyre::eyre!("{}", e)
    })?;

    AppContext::build(&config, &paths, api_key)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to start session: {}", e))
}

/// Print the notifications still inside their display window.
pub fn show_notifications(ctx: &mut AppContext, output: &Output) {
    for notification in ctx.notifier.active() {
        output.notification(notification);
    }
}
