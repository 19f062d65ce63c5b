use rembees_config::{Config, ConfigManager};
use std::fs;
use tempfile::tempdir;

#[test]
fn default_config_has_sensible_fields() {
    let cfg = Config::default();

    assert!(cfg.seed_on_first_run);
    assert_eq!(cfg.recent_limit, 5);
    assert!(!cfg.log_filter.is_empty());
    assert!(cfg.resolve_data_dir().ends_with("rembees"));
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.data_dir = Some(dir.path().join("data"));
    cfg.seed_on_first_run = false;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.resolve_data_dir(), dir.path().join("data"));
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().join("nested")).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
    assert!(!manager.config_path().exists());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"recent_limit": 10}"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load");
    assert_eq!(loaded.recent_limit, 10);
    assert!(loaded.seed_on_first_run);
    assert_eq!(loaded.log_filter, "rembees=warn");
}

#[test]
fn malformed_file_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "{").expect("write");

    let err = ConfigManager::new(path).load().unwrap_err();
    assert!(err.to_string().starts_with("Serialization error"));
}
