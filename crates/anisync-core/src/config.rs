use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub crunchyroll: CrunchyrollConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// `tracing_subscriber` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrunchyrollConfig {
    pub enabled: bool,
    pub email: Option<String>,
    pub password: Option<String>,
    pub locale: String,
    pub client_id: String,
    pub client_secret: String,
}

impl CrunchyrollConfig {
    /// Email and password, or a config error naming what is missing.
    pub fn login(&self) -> Result<(&str, &str), SyncError> {
        let email = self
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| SyncError::Config("crunchyroll.email is not set".into()))?;
        let password = self
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| SyncError::Config("crunchyroll.password is not set".into()))?;
        Ok((email, password))
    }
}

impl AppConfig {
    /// Load config: user file (if exists), else built-in defaults.
    pub fn load() -> Result<Self, SyncError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self, SyncError> {
        if path.exists() {
            let user_str =
                std::fs::read_to_string(path).map_err(|e| SyncError::Config(e.to_string()))?;
            toml::from_str(&user_str).map_err(|e| SyncError::Config(e.to_string()))
        } else {
            toml::from_str(DEFAULT_CONFIG).map_err(|e| SyncError::Config(e.to_string()))
        }
    }

    /// Save current config to the given file.
    pub fn save_to(&self, path: &Path) -> Result<(), SyncError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SyncError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "anisync")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
