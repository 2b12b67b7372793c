//! ConfigStore - Local Configuration Storage
//!
//! `ferremarket-admin.toml` in the platform config directory, with
//! environment overrides for the backend connection.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::config::AppConfig;
use crate::error::{Error, Result};
use crate::helpers::{get_or_create_config_dir, write_atomic};

pub const CONFIG_FILE: &str = "ferremarket-admin.toml";
pub const ENV_URL: &str = "FERREMARKET_URL";
pub const ENV_ANON_KEY: &str = "FERREMARKET_ANON_KEY";

/// Default config file location
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE))
}

/// Read a config file; a missing file yields the defaults
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    Ok(toml::from_str(&content)?)
}

pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    write_atomic(path, content.as_bytes())
}

/// Apply overrides from a variable lookup (the process env in practice)
pub fn apply_env_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_URL).filter(|v| !v.trim().is_empty()) {
        config.backend.url = url.trim().to_string();
    }
    if let Some(key) = lookup(ENV_ANON_KEY).filter(|v| !v.trim().is_empty()) {
        config.backend.anon_key = key.trim().to_string();
    }
}

/// Load from `path` (or the default location), then apply env overrides
pub fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    let mut config = load_config(&path)?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    validate(&config)?;
    Ok(config)
}

fn validate(config: &AppConfig) -> Result<()> {
    let url = config.backend.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::Invalid {
            message: format!("backend.url must be an http(s) URL, got {url:?}"),
        });
    }
    if config.backend.timeout_secs == 0 {
        return Err(Error::Invalid {
            message: "backend.timeout_secs must be positive".to_string(),
        });
    }
    Ok(())
}
