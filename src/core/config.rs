// src/core/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use tracing::info;

use super::config_loader::config_paths;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // How often consumers should pull a fresh record (in seconds)
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u32,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SourceConfig {
    // Alternative path to the registry-dump utility
    pub command: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StoreConfig {
    // Explicit slot file, instead of the shared per-user data directory
    pub path: Option<PathBuf>,
}

impl Config {
    // Loads system default and then overrides with user config, if present
    pub fn load() -> Result<Self> {
        let (system, user) = config_paths();
        info!(system = ?system, user = ?user, "Loading configuration paths");

        // Ensure the user config directory exists
        if let Some(parent) = user.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Creating config directory at {parent:?}"))?;
        }

        // 1. Read system default (which should always exist in installed package)
        info!(path = ?system, "Reading system default config");
        let base = fs::read_to_string(&system)
            .with_context(|| format!("Reading system default config at {system:?}"))?;
        let mut cfg: Config = toml::from_str(&base).context("Parsing system default config")?;

        // 2. If user config exists, merge/override
        if user.exists() {
            info!(path = ?user, "Overlaying user configuration");
            let overlay = fs::read_to_string(&user)
                .with_context(|| format!("Reading user config at {user:?}"))?;
            let user_cfg: Config = toml::from_str(&overlay).context("Parsing user config")?;

            // Simple merge: the user file replaces each section entirely
            cfg.refresh_secs = user_cfg.refresh_secs;
            cfg.source = user_cfg.source;
            cfg.store = user_cfg.store;
        } else {
            info!(path = ?user, "No user config found; using defaults");
        }

        // 3. Validate config values
        if cfg.refresh_secs == 0 {
            Err(anyhow::anyhow!("refresh_secs must be at least 1"))?
        }

        info!(?cfg, "Configuration loaded succesfully");
        Ok(cfg)
    }
}

// The original panel refreshed once a minute; keep that as the default
fn default_refresh_secs() -> u32 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Config {
            refresh_secs: default_refresh_secs(),
            source: SourceConfig::default(),
            store: StoreConfig::default(),
        }
    }
}
