//! Board configuration loaded from `.sg/config.toml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sg_week::WeekStart;

use crate::error::GoalError;

/// Config file location, relative to the project root.
pub const CONFIG_FILE: &str = ".sg/config.toml";

/// Board settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// User identity the board acts as.
    #[serde(default = "default_user")]
    pub user: String,

    /// First day of the week: "sunday" or "monday".
    #[serde(default)]
    pub week_start: WeekStart,

    /// Directory of the JSON goal store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// JSONL activity log. Relative paths resolve against the project root.
    #[serde(default = "default_events_log")]
    pub events_log: PathBuf,

    /// Wide layouts follow the parent week cursor; narrow ones re-anchor on today.
    #[serde(default = "default_wide_layout")]
    pub wide_layout: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            week_start: WeekStart::default(),
            data_dir: default_data_dir(),
            events_log: default_events_log(),
            wide_layout: default_wide_layout(),
        }
    }
}

// Serde default functions
fn default_user() -> String {
    "me".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".sg/goals")
}

fn default_events_log() -> PathBuf {
    PathBuf::from(".sg/events.jsonl")
}

fn default_wide_layout() -> bool {
    true
}

impl BoardConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, GoalError> {
        let content = std::fs::read_to_string(path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| GoalError::ConfigError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Try to load config, returning default if the file doesn't exist.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, GoalError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Load the project's config and resolve its paths against `project_root`.
    pub fn for_project(project_root: &Path) -> Result<Self, GoalError> {
        let mut config = Self::load_or_default(&project_root.join(CONFIG_FILE))?;
        config.data_dir = resolve(project_root, &config.data_dir);
        config.events_log = resolve(project_root, &config.events_log);
        Ok(config)
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
