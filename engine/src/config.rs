//! Storage backend configuration.

use crate::{error::Result, Storage};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Which storage backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// In-memory map, lost on exit
    #[default]
    Memory,
    /// JSON file at [`Config::path`]
    File,
    /// Browser `localStorage` (wasm32 only)
    Browser,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "file" => Ok(Backend::File),
            "browser" | "localstorage" => Ok(Backend::Browser),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Storage backend
    pub backend: Backend,
    /// Backing file for [`Backend::File`]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load `.env` if present, then read the environment.
    pub fn load() -> std::result::Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables.
    ///
    /// - `LOCALSYNC_BACKEND`: `memory` (default), `file` or `browser`
    /// - `LOCALSYNC_PATH`: file path, required for `file`
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> std::result::Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup("LOCALSYNC_BACKEND")
            .map(|v| v.parse::<Backend>())
            .transpose()?
            .unwrap_or_default();

        let path = lookup("LOCALSYNC_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        if backend == Backend::File && path.is_none() {
            return Err(ConfigError::MissingPath);
        }

        Ok(Self { backend, path })
    }

    /// Configuration for a file backend at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::File,
            path: Some(path.into()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown LOCALSYNC_BACKEND value: {0}")]
    UnknownBackend(String),

    #[error("LOCALSYNC_PATH environment variable is required for the file backend")]
    MissingPath,
}

/// Open the storage backend described by `config`.
pub fn open_storage(config: &Config) -> Result<Box<dyn Storage>> {
    tracing::info!(backend = ?config.backend, "opening storage");
    match config.backend {
        Backend::Memory => Ok(Box::new(crate::MemoryStorage::new())),
        Backend::File => {
            let path = config
                .path
                .as_ref()
                .ok_or_else(|| crate::Error::Storage("no file path configured".into()))?;
            Ok(Box::new(crate::FileStorage::open(path)?))
        }
        #[cfg(target_arch = "wasm32")]
        Backend::Browser => Ok(Box::new(crate::BrowserStorage::new())),
        #[cfg(not(target_arch = "wasm32"))]
        Backend::Browser => Err(crate::Error::Storage("localStorage unavailable".into())),
    }
}
