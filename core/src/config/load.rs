use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default dayplan data directory: ~/.dayplan
pub fn get_dayplan_data_dir() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".dayplan"))
}

/// Expand `~` and `$VARS` in a configured path.
pub fn expand_path(raw: &str) -> String {
    shellexpand::full(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.dayplan/config.toml (highest)
    let data_dir = get_dayplan_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let cfg = if user_config.exists() {
        read_config(&user_config)?
    } else if local_config.exists() {
        read_config(local_config)?
    } else {
        AppConfig::default()
    };

    finish(cfg, &data_dir)
}

/// Load an explicit config file (`--config`), applying the same
/// normalisation and environment overrides as [`load_default`].
pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let cfg = read_config(path)?;
    finish(cfg, &get_dayplan_data_dir()?)
}

fn read_config(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))
}

fn finish(mut cfg: AppConfig, data_dir: &Path) -> anyhow::Result<AppConfig> {
    // Default the log directory to the data directory
    if cfg
        .logging
        .directory
        .as_deref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
    {
        let logs_dir = data_dir.join("logs");
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    cfg.tasks.book = expand_path(&cfg.tasks.book);
    cfg.notes.docs = cfg.notes.docs.iter().map(|d| expand_path(d)).collect();
    if let Some(dir) = cfg.logging.directory.as_mut() {
        *dir = expand_path(dir);
    }

    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

// Environment variable overrides (Priority 0: highest)
fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Some(v) = env_non_empty("DAYPLAN_MAX_WORKERS") {
        match v.parse::<usize>() {
            Ok(n) => cfg.executor.max_workers = n,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid DAYPLAN_MAX_WORKERS"),
        }
    }
    if let Some(v) = env_non_empty("DAYPLAN_NOTES_STRATEGY") {
        match v.parse() {
            Ok(strategy) => cfg.notes.strategy = strategy,
            Err(e) => tracing::warn!(error = %e, "ignoring DAYPLAN_NOTES_STRATEGY"),
        }
    }
    if let Some(v) = env_non_empty("DAYPLAN_EMBEDDING_URL") {
        cfg.notes.embedding.base_url = v;
    }
    if let Some(v) = env_non_empty("DAYPLAN_EMBEDDING_API_KEY") {
        cfg.notes.embedding.api_key = v;
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
