pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{validate_api_key, CatalogConfig, Config, FetchConfig, LoggingConfig, NotificationConfig, API_KEY_ENV_VAR};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
