use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Stores user-configurable preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the persisted records. Defaults to the
    /// platform's local data directory.
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_seed_on_first_run")]
    pub seed_on_first_run: bool,
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed_on_first_run: Self::default_seed_on_first_run(),
            recent_limit: Self::default_recent_limit(),
            log_filter: Self::default_log_filter(),
        }
    }
}

impl Config {
    pub fn default_seed_on_first_run() -> bool {
        true
    }

    pub fn default_recent_limit() -> usize {
        5
    }

    pub fn default_log_filter() -> String {
        "rembees=warn".into()
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("rembees")
    }
}
