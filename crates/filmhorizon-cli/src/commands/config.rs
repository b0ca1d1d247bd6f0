use super::prompts;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use filmhorizon_config::{validate_api_key, Config, CredentialStore, PathManager, API_KEY_ENV_VAR};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Init { api_key } => init_config(api_key, output),
    }
}

/// Where the active API key comes from.
fn api_key_source(credentials: &CredentialStore) -> (&'static str, Option<String>) {
    if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
        return (API_KEY_ENV_VAR, Some(key));
    }
    match credentials.get_tmdb_api_key() {
        Some(key) => ("credentials.toml", Some(key.clone())),
        None => ("none", None),
    }
}

fn section_table(title: &str, rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new(title).fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Showing defaults. Run 'filmhorizon config init' to write a config file.");
    }

    let config = super::load_config(&path_manager)?;

    let credentials_file = path_manager.credentials_file();
    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials.load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let (key_source, key) = api_key_source(&credentials);
    let key_display = match key {
        Some(key) if full => key,
        Some(key) => mask_string(&key),
        None => "<not set>".to_string(),
    };
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "╔════════════════════════════════════════════════════════════╗".bright_white());
            println!("{} {}", "║".bright_white(), "FilmHorizon Configuration".bright_cyan().bold());
            println!("{}", "╚════════════════════════════════════════════════════════════╝".bright_white());
            println!();

            println!("{}", section_table("Files", vec![
                ("Config file", config_file.display().to_string()),
                ("Credentials", credentials_file.display().to_string()),
                ("Storage", path_manager.storage_file().display().to_string()),
                ("Log file", log_file),
            ]));
            println!("{}", section_table("Catalog", vec![
                ("Base URL", config.catalog.base_url.clone()),
                ("Image URL", config.catalog.image_base_url.clone()),
                ("Poster size", config.catalog.poster_size.clone()),
                ("Language", config.catalog.language.clone()),
                ("Timeout", format!("{}s", config.catalog.timeout_secs)),
                ("API key", format!("{} ({})", key_display, key_source)),
            ]));
            println!("{}", section_table("Behavior", vec![
                ("Search debounce", format!("{}ms", config.fetch.debounce_ms)),
                ("Notification display", format!("{}ms", config.notifications.display_ms)),
            ]));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "credentials_file": credentials_file.display().to_string(),
                "storage_file": path_manager.storage_file().display().to_string(),
                "config": config,
                "api_key": key_display,
                "api_key_source": key_source,
            }));
        }
    }

    Ok(())
}

fn init_config(api_key_arg: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    path_manager.ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let config_file = path_manager.config_file();
    if config_file.exists() {
        output.info(format!("Keeping existing configuration at {}", config_file.display()));
    } else {
        Config::default().save_to_file(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
        output.success(format!("Wrote default configuration to {}", config_file.display()));
    }

    let credentials_file = path_manager.credentials_file();
    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials.load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    if api_key_arg.is_none() && credentials.get_tmdb_api_key().is_some() {
        let replace = prompts::prompt_yes_no("An API key is already stored. Replace it?", Some(false))?;
        if !replace {
            output.info("Keeping the stored API key.");
            return Ok(());
        }
    }

    let api_key = match api_key_arg {
        Some(key) => key,
        None => prompts::prompt_secret("Catalog API key")?,
    };
    let api_key = api_key.trim().to_string();
    validate_api_key(&api_key).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    credentials.set_tmdb_api_key(api_key);
    credentials.save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;

    output.success(format!("API key saved to {}", credentials_file.display()));
    if std::env::var(API_KEY_ENV_VAR).is_ok() {
        output.warn(format!("{} is set and takes precedence over the stored key", API_KEY_ENV_VAR));
    }

    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.len() <= 4 {
        return "*".repeat(s.len());
    }
    match (s.get(..2), s.get(s.len() - 2..)) {
        (Some(head), Some(tail)) => format!("{}***{}", head, tail),
        _ => "*".repeat(s.chars().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("abcdef123456"), "ab***56");
    }

    #[test]
    fn test_api_key_source_prefers_stored_key_without_env() {
        let mut credentials = CredentialStore::new(std::path::PathBuf::from("credentials.toml"));
        credentials.set_tmdb_api_key("stored-key".to_string());
        if std::env::var(API_KEY_ENV_VAR).is_err() {
            assert_eq!(api_key_source(&credentials), ("credentials.toml", Some("stored-key".to_string())));
        }
    }
}
