// src/core/config_loader.rs

use directories::BaseDirs;
use std::path::PathBuf;

// Next to the installed binary, with a development fallback into the
// source tree so `cargo run` works without an install step.
fn system_default() -> PathBuf {
    let installed = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join("default.toml")));

    match installed {
        Some(path) if path.exists() => path,
        _ => PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("config")
            .join("default.toml"),
    }
}

// XDG_CONFIG_HOME/battinfo-rs/config.toml
fn user_override() -> PathBuf {
    BaseDirs::new()
        .map(|d| d.config_dir().join("battinfo-rs").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config/config.toml"))
}

/// (system default, user override) paths, in merge order.
pub fn config_paths() -> (PathBuf, PathBuf) {
    (system_default(), user_override())
}
