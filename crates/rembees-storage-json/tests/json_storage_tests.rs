use chrono::NaiveDate;
use rembees_core::{
    storage::{KeyValueStore, THEME_KEY, TRANSACTIONS_KEY, USER_KEY},
    FinanceStore,
};
use rembees_domain::{NewTransaction, Theme};
use rembees_storage_json::JsonFileStore;
use std::fs;
use tempfile::tempdir;

#[test]
fn json_storage_can_set_get_and_remove_records() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonFileStore::new(dir.path().join("data")).expect("create storage");

    assert_eq!(storage.get("rembees_theme").expect("get"), None);
    storage.set("rembees_theme", "\"dark\"").expect("set");
    assert_eq!(
        storage.get("rembees_theme").expect("get").as_deref(),
        Some("\"dark\"")
    );
    let path = storage.record_path("rembees_theme");
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(path.exists());

    storage.remove("rembees_theme").expect("remove");
    assert!(!path.exists());
    storage.remove("rembees_theme").expect("second remove is fine");
}

#[test]
fn json_storage_leaves_no_temp_files_behind() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonFileStore::new(dir.path().to_path_buf()).expect("create storage");
    storage.set(USER_KEY, "{}").expect("set");
    storage.set(USER_KEY, "{\"a\":1}").expect("overwrite");

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
    assert_eq!(storage.list_keys().expect("keys"), vec![USER_KEY.to_string()]);
}

#[test]
fn failed_write_keeps_the_previous_record() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonFileStore::new(dir.path().to_path_buf()).expect("create storage");
    storage.set(THEME_KEY, "original").expect("initial write");

    // A directory at the temp path makes File::create fail.
    let mut tmp = storage.record_path(THEME_KEY).into_os_string();
    tmp.push(".tmp");
    fs::create_dir_all(&tmp).expect("block temp path");

    assert!(storage.set(THEME_KEY, "replacement").is_err());
    assert_eq!(
        storage.get(THEME_KEY).expect("get").as_deref(),
        Some("original")
    );
}

#[test]
fn finance_store_round_trips_through_the_filesystem() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("rembees");
    let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

    {
        let mut store = FinanceStore::open(JsonFileStore::new(root.clone()).expect("storage"));
        store
            .add_transaction(NewTransaction::expense(150_000, "food", "Makan Malam", date))
            .expect("add");
        store.login("jane@example.com").expect("login");
        store.set_theme(Theme::Neon).expect("theme");
    }

    let store = FinanceStore::open(JsonFileStore::new(root.clone()).expect("storage"));
    assert_eq!(store.transactions().len(), 6);
    assert_eq!(store.transactions()[0].description, "Makan Malam");
    assert_eq!(store.user().map(|u| u.name.as_str()), Some("jane"));
    assert_eq!(store.theme(), Theme::Neon);
    assert!(root.join(format!("{TRANSACTIONS_KEY}.json")).exists());
}
