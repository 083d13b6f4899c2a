use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default bookstall data directory: ~/.bookstall
pub fn data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".bookstall"))
}

/// Load a config file from an explicit path, applying env overrides.
pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    let mut cfg: AppConfig = toml::from_str(&s)?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.bookstall/config.toml (highest)
    let bookstall_dir = data_dir()?;
    let home_config = bookstall_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if home_config.exists() {
        let s = std::fs::read_to_string(&home_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else if local_config.exists() {
        let s = std::fs::read_to_string(local_config)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    // Default log directory lives under the data directory
    if cfg
        .logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .is_none()
    {
        let logs_dir = bookstall_dir.join("logs");
        std::fs::create_dir_all(&logs_dir)?;
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

// Environment variable overrides (Priority 0: highest)
fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Ok(v) = std::env::var("BOOKSTALL_SERVER_URL") {
        if !v.trim().is_empty() {
            cfg.server.base_url = v;
        }
    }
    if let Ok(v) = std::env::var("BOOKSTALL_TIMEOUT_MS") {
        if let Ok(ms) = v.trim().parse::<u64>() {
            cfg.server.timeout_ms = ms;
        }
    }
}
