use crate::credentials::CredentialStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the stored catalog API key
pub const API_KEY_ENV_VAR: &str = "FILMHORIZON_API_KEY";

const API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote movie catalog settings. The API key lives in the credential store.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_poster_size")]
    pub poster_size: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FetchConfig {
    /// Quiet period before a search fetch fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NotificationConfig {
    #[serde(default = "default_display_ms")]
    pub display_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Rolling log file; logs go to stderr when unset
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_poster_size() -> String {
    "w500".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_display_ms() -> u64 {
    3000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            poster_size: default_poster_size(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_ms: default_display_ms(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("catalog.base_url", &self.catalog.base_url),
            ("catalog.image_base_url", &self.catalog.image_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(anyhow::anyhow!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }

        if self.catalog.timeout_secs == 0 {
            return Err(anyhow::anyhow!("catalog.timeout_secs must be greater than zero"));
        }

        if self.catalog.language.trim().is_empty() {
            return Err(anyhow::anyhow!("catalog.language cannot be empty"));
        }

        Ok(())
    }

    /// Resolve the catalog API key: environment first, then the credential store.
    pub fn resolve_api_key(&self, credentials: &CredentialStore) -> anyhow::Result<String> {
        let key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .or_else(|| credentials.get_tmdb_api_key().cloned())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No catalog API key configured. Run 'filmhorizon config init' or set {}",
                    API_KEY_ENV_VAR
                )
            })?;

        validate_api_key(&key)?;
        Ok(key)
    }
}

pub fn validate_api_key(key: &str) -> anyhow::Result<()> {
    let trimmed = key.trim();
    if trimmed.is_empty() || trimmed == API_KEY_PLACEHOLDER {
        return Err(anyhow::anyhow!("Catalog API key is not configured"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(anyhow::anyhow!("Catalog API key must not contain whitespace"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.fetch.debounce_ms = 250;
        config.catalog.language = "de-DE".to_string();

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.fetch.debounce_ms, 250);
        assert_eq!(loaded.catalog.language, "de-DE");
        assert_eq!(loaded.notifications.display_ms, 3000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[fetch]\ndebounce_ms = 10\n").unwrap();
        assert_eq!(config.fetch.debounce_ms, 10);
        assert_eq!(config.catalog.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.catalog.poster_size, "w500");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.fetch.debounce_ms, 1000);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.catalog.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.catalog.base_url = default_base_url();
        config.catalog.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("").is_err());
        assert!(validate_api_key("YOUR_API_KEY").is_err());
        assert!(validate_api_key("abc def").is_err());
        assert!(validate_api_key("224fb7362c8a").is_ok());
    }
}
