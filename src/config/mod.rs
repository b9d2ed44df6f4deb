pub mod schema;

pub use schema::{StatlineConfig, DEFAULT_FOLLOWUP, DEFAULT_QUESTION};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default config file location (`<config dir>/statline/statline.toml`).
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "statline")
        .map(|d| d.config_dir().join("statline.toml"))
        .unwrap_or_else(|| PathBuf::from("statline.toml"))
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<StatlineConfig> {
    if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read statline config file")?;
        let config: StatlineConfig =
            toml::from_str(&contents).context("Failed to parse statline config (TOML)")?;
        Ok(config)
    } else {
        Ok(StatlineConfig::default())
    }
}

/// Resolve the effective config: defaults, then the TOML file (if any),
/// then the process environment.
pub fn resolve(path: Option<&str>) -> Result<StatlineConfig> {
    let path = match path {
        Some(p) => PathBuf::from(shellexpand::tilde(p).into_owned()),
        None => default_config_path(),
    };

    let mut config = load_config(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}
