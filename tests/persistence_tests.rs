mod common;

use std::fs;

use common::{scenario, temp_dir, temp_storage};
use expense_tracker::{
    core::DisplayMode,
    ledger::Ledger,
    storage::{self, JsonStorage, StorageBackend, DARK_MODE_KEY, TRANSACTIONS_KEY},
};

#[test]
fn ledger_round_trips_through_json_files() {
    let storage = temp_storage();
    let ledger = Ledger::from_transactions(scenario());
    storage::save_ledger(&storage, &ledger).unwrap();

    let reloaded = storage::load_ledger(&storage);
    assert_eq!(reloaded.transactions(), ledger.transactions());
}

#[test]
fn stored_records_use_documented_field_names() {
    let storage = temp_storage();
    storage::save_ledger(&storage, &Ledger::from_transactions(scenario())).unwrap();

    let raw = storage.get_item(TRANSACTIONS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["type"], "expense");
    assert_eq!(first["amount"], 50.0);
    assert_eq!(first["category"], "food");
    assert_eq!(first["date"], "2024-01-10");
    assert_eq!(first["description"], "No description");
    assert!(first["id"].is_string());
}

#[test]
fn corrupt_or_missing_values_fall_back_to_defaults() {
    let storage = temp_storage();
    assert!(storage::load_ledger(&storage).is_empty());
    assert_eq!(storage::load_display_mode(&storage), DisplayMode::Light);

    storage.set_item(TRANSACTIONS_KEY, "{not json").unwrap();
    storage.set_item(DARK_MODE_KEY, "\"sometimes\"").unwrap();
    assert!(storage::load_ledger(&storage).is_empty());
    assert_eq!(storage::load_display_mode(&storage), DisplayMode::Light);
}

#[test]
fn records_breaking_amount_or_category_rules_are_not_loaded() {
    let storage = temp_storage();
    let record = |amount: f64, category: &str| {
        format!(
            r#"[{{"id":"6f1c2a8e-3b7d-4c1a-9e2f-0a1b2c3d4e5f","type":"expense","amount":{},"category":"{}","date":"2024-01-10","description":"lunch"}}]"#,
            amount, category
        )
    };

    storage.set_item(TRANSACTIONS_KEY, &record(12.5, "food")).unwrap();
    assert_eq!(storage::load_ledger(&storage).len(), 1);

    for corrupt in [record(-5.0, "food"), record(0.0, "food"), record(5.0, "")] {
        storage.set_item(TRANSACTIONS_KEY, &corrupt).unwrap();
        assert!(storage::load_ledger(&storage).is_empty(), "loaded {corrupt}");
    }
}

#[test]
fn dark_mode_flag_persists_as_enabled() {
    let storage = temp_storage();
    storage::save_display_mode(&storage, DisplayMode::Dark).unwrap();
    assert_eq!(storage.get_item(DARK_MODE_KEY).unwrap().as_deref(), Some("\"enabled\""));
    assert_eq!(storage::load_display_mode(&storage), DisplayMode::Dark);
}

#[test]
fn each_key_is_its_own_file() {
    let root = temp_dir().join("data");
    let storage = JsonStorage::new(Some(root.clone())).unwrap();
    storage.set_item(TRANSACTIONS_KEY, "[]").unwrap();

    assert_eq!(fs::read_to_string(root.join("transactions.json")).unwrap(), "[]");
    let leftovers: Vec<_> = fs::read_dir(&root)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().map_or(false, |ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
