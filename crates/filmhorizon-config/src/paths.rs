use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("FILMHORIZON_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("filmhorizon");

        Ok(Self::with_base(base_dir))
    }

    pub fn from_docker_env() -> Self {
        Self::with_base(container_base_path())
    }

    /// Config files at the base level, data and logs in subdirectories.
    pub fn with_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    /// Backing file for the persisted key/value store (`watchlist`, `currentPage`).
    pub fn storage_file(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("filmhorizon.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // The container base directory only exists inside the image
        let base = container_base_path();
        if base.exists() {
            return Self::from_docker_env();
        }

        Self::new().unwrap_or_else(|_| Self::from_docker_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_base() {
        let pm = PathManager::with_base(PathBuf::from("/tmp/fh"));
        assert_eq!(pm.config_file(), PathBuf::from("/tmp/fh/config.toml"));
        assert_eq!(pm.credentials_file(), PathBuf::from("/tmp/fh/credentials.toml"));
        assert_eq!(pm.storage_file(), PathBuf::from("/tmp/fh/data/storage.json"));
        assert_eq!(pm.default_log_file(), PathBuf::from("/tmp/fh/logs/filmhorizon.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempfile::tempdir().unwrap();
        let pm = PathManager::with_base(dir.path().join("fh"));
        pm.ensure_directories().unwrap();
        assert!(pm.data_dir().is_dir());
        assert!(pm.log_dir().is_dir());
    }
}
