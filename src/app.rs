//! Wires configuration, on-disk storage and the finance store together.

use std::{env, path::PathBuf};

use rembees_config::{Config, ConfigManager};
use rembees_core::{FinanceStore, StoreOptions};
use rembees_storage_json::JsonFileStore;

use crate::{errors::AppError, utils};

/// Overrides the base directory for both config and data.
pub const HOME_ENV: &str = "REMBEES_HOME";

const APP_DIR_NAME: &str = "rembees";
const DATA_DIR_NAME: &str = "data";

/// Everything a front-end needs to drive the finance store.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub config_manager: ConfigManager,
    pub store: FinanceStore,
}

impl AppContext {
    /// Loads config from `<home>/config.json` (or the platform config dir when
    /// `home` is `None`), initialises tracing and opens the store.
    pub fn open(home: Option<PathBuf>) -> Result<Self, AppError> {
        let config_dir = match &home {
            Some(home) => home.clone(),
            None => default_config_dir(),
        };
        let config_manager = ConfigManager::with_base_dir(config_dir)?;
        let config = config_manager.load()?;
        utils::init_tracing(&config.log_filter);

        let data_dir = match (&config.data_dir, &home) {
            (Some(dir), _) => dir.clone(),
            (None, Some(home)) => home.join(DATA_DIR_NAME),
            (None, None) => config.resolve_data_dir(),
        };
        let storage = JsonFileStore::new(data_dir)?;
        let options = StoreOptions {
            seed_on_first_run: config.seed_on_first_run,
        };
        let store = FinanceStore::open_with(storage, options);

        tracing::debug!(
            config = %config_manager.config_path().display(),
            "application context ready"
        );
        Ok(Self {
            config,
            config_manager,
            store,
        })
    }

    /// Same as [`AppContext::open`], honouring `REMBEES_HOME`.
    pub fn open_from_env() -> Result<Self, AppError> {
        let home = env::var_os(HOME_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::open(home)
    }

    /// Flushes pending writes before the store is dropped.
    pub fn close(self) -> Result<(), AppError> {
        self.store.close()?;
        Ok(())
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_places_records_under_home() {
        let dir = tempdir().expect("tempdir");
        let context = AppContext::open(Some(dir.path().to_path_buf())).expect("open");

        assert_eq!(context.store.transactions().len(), 5);
        assert!(dir.path().join("data").join("rembees_transactions.json").exists());
        assert_eq!(
            context.config_manager.config_path(),
            dir.path().join("config.json")
        );
    }

    #[test]
    fn configured_data_dir_wins_over_home() {
        let dir = tempdir().expect("tempdir");
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
        let config = Config {
            data_dir: Some(dir.path().join("elsewhere")),
            seed_on_first_run: false,
            ..Config::default()
        };
        manager.save(&config).expect("save");

        let context = AppContext::open(Some(dir.path().to_path_buf())).expect("open");
        assert!(context.store.transactions().is_empty());
        assert!(dir
            .path()
            .join("elsewhere")
            .join("rembees_transactions.json")
            .exists());
    }
}
