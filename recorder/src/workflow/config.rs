use anyhow::Context;
use lifecore::config::DEFAULT_CONFIG_PATH;
use lifecore::TrackerConfig;
use std::path::{Path, PathBuf};

/// Resolves the tracker settings: an explicit file must exist, the default
/// `lifelog.yaml` is optional. CLI overrides win over both.
pub fn resolve(
    config_path: Option<&Path>,
    autosave: Option<PathBuf>,
    tick_interval_ms: Option<u64>,
) -> anyhow::Result<TrackerConfig> {
    let mut config = match config_path {
        Some(path) => TrackerConfig::load(path)
            .with_context(|| format!("reading tracker config {}", path.display()))?,
        None => TrackerConfig::load_or_default(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("reading tracker config {DEFAULT_CONFIG_PATH}"))?,
    };

    if let Some(path) = autosave {
        config.autosave_path = path;
    }
    if let Some(interval) = tick_interval_ms {
        anyhow::ensure!(interval > 0, "tick interval must be positive");
        config.tick_interval_ms = interval;
    }
    Ok(config)
}
