//! # Configuration Persistence
//!
//! User configuration stored in `~/.config/fortune-tv/config.json`.
//!
//! ## Overview
//!
//! Every field is optional in the file; missing fields take their defaults
//! and unknown fields are rejected. Command-line flags override the loaded
//! values (see `main.rs`).
//!
//! ```json
//! {
//!   "endpoint": "https://random-quotes-freeapi.vercel.app/api/random",
//!   "catalog": "/home/me/movie_quotes.json",
//!   "start_page": "movie-quotes",
//!   "log_level": "debug",
//!   "fetch_timeout_secs": 5,
//!   "gallery": { "batch_size": 10 }
//! }
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.

use crate::fortune::DEFAULT_ENDPOINT;
use crate::gallery::GalleryConfig;
use crate::ui::pages::Page;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "fortune-tv";

/// Persisted user configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Remote fortune endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Movie quotes catalog file. The embedded catalog is used when unset.
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Page shown at startup (`fortunes` or `movie-quotes`).
    #[serde(default = "default_start_page")]
    pub start_page: String,

    /// `tracing` filter directive for the log file.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default)]
    pub gallery: GalleryConfig,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_start_page() -> String {
    Page::Fortunes.key().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            catalog: None,
            start_page: default_start_page(),
            log_level: default_log_level(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            gallery: GalleryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location. A missing file yields
    /// `Config::default()`; an unreadable or invalid one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            // No home directory: nothing to load
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.json"))
    }

    /// Return the path to the log file.
    pub fn log_path() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().join(format!("{}.log", APP_NAME)))
    }
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME).context("Could not determine config directory")
}
