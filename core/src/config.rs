use crate::prelude::{TrackerError, TrackerResult};
use crate::scheduler::{RedrawScheduler, DEFAULT_FILLER_STEP, DEFAULT_TICK_INTERVAL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_AUTOSAVE_PATH: &str = "data.txt";
pub const DEFAULT_CONFIG_PATH: &str = "lifelog.yaml";

/// Runtime settings shared by the desktop shell and the headless recorder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub autosave_path: PathBuf,
    pub tick_interval_ms: u64,
    pub filler_step: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            autosave_path: PathBuf::from(DEFAULT_AUTOSAVE_PATH),
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            filler_step: DEFAULT_FILLER_STEP,
        }
    }
}

impl TrackerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        let path_ref = path.as_ref();
        let contents =
            fs::read_to_string(path_ref).map_err(|err| TrackerError::file_access(path_ref, err))?;
        Self::parse(&contents).map_err(|message| TrackerError::Config {
            path: path_ref.to_path_buf(),
            message,
        })
    }

    /// Reads `path` when it exists, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        match Self::load(path) {
            Err(err) if err.is_not_found() => Ok(Self::default()),
            other => other,
        }
    }

    fn parse(contents: &str) -> Result<Self, String> {
        let config: TrackerConfig = serde_yaml::from_str(contents).map_err(|e| e.to_string())?;
        if config.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be positive".into());
        }
        if !config.filler_step.is_finite() || config.filler_step < 0.0 {
            return Err("filler_step must be a non-negative number".into());
        }
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn to_scheduler(&self) -> RedrawScheduler {
        RedrawScheduler::new(self.tick_interval(), self.filler_step)
    }
}
