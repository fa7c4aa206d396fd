//! End-to-end behaviour of an inventory backed by a file on disk.

use rental::{
    Error, Inventory, JsonFile, KeyPolicy, LoadOutcome, Location, NewRoom, RoomUpdate, Tenant,
    domain::{DataError, ValidationError},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use test_case::test_case;

fn store(tmp: &TempDir) -> JsonFile {
    JsonFile::new(tmp.path().join("data.json"))
}

fn write(tmp: &TempDir, document: &Value) {
    std::fs::write(tmp.path().join("data.json"), document.to_string()).unwrap();
}

fn read(tmp: &TempDir) -> Value {
    serde_json::from_str(&std::fs::read_to_string(tmp.path().join("data.json")).unwrap()).unwrap()
}

#[test]
fn saved_rooms_reload_in_order() {
    let tmp = TempDir::new().unwrap();

    let mut inventory = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();
    assert_eq!(inventory.load_outcome(), LoadOutcome::Missing);
    inventory
        .add(
            NewRoom::new(1, 1000.0, Location::coordinates(10.0, 20.0))
                .with_tenant(Tenant::new("Jan", "Kowalski", "jan@example.com")),
        )
        .unwrap();
    inventory
        .add(
            NewRoom::new(2, 1500.0, Location::default())
                .premium(vec!["WiFi".to_string(), "TV".to_string()]),
        )
        .unwrap();
    inventory.save().unwrap();

    let reloaded = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();

    assert_eq!(reloaded.load_outcome(), LoadOutcome::Read);
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.rooms()[0].number(), 1);
    assert_eq!(
        reloaded.rooms()[0].tenant().map(|tenant| tenant.email.as_str()),
        Some("jan@example.com")
    );
    assert_eq!(
        reloaded.rooms()[1].amenities(),
        Some(["WiFi".to_string(), "TV".to_string()].as_slice())
    );
    assert_eq!(reloaded.rooms(), inventory.rooms());
}

#[test]
fn saved_file_uses_document_field_names() {
    let tmp = TempDir::new().unwrap();

    let mut inventory = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();
    inventory
        .add(
            NewRoom::new(2, 1500.0, Location::coordinates(1.0, 2.0))
                .premium(vec!["WiFi".to_string()]),
        )
        .unwrap();
    inventory.save().unwrap();

    assert_eq!(
        read(&tmp),
        json!({
            "pokoje": [{
                "numer": 2,
                "czynsz": 1500.0,
                "najemca": null,
                "lokalizacja": [1.0, 2.0],
                "udogodnienia": ["WiFi"],
            }]
        })
    );
}

#[test]
fn unknown_top_level_keys_survive_a_save() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        &json!({
            "wersja": 3,
            "wlasciciel": {"imie": "Ewa"},
            "pokoje": [],
        }),
    );

    let mut inventory = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();
    inventory
        .add(NewRoom::new(5, 700.0, Location::address("Kraków", "Długa", "12a")))
        .unwrap();
    inventory.save().unwrap();

    let reloaded = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();
    assert_eq!(reloaded.document().get("wersja"), Some(&json!(3)));
    assert_eq!(
        reloaded.document().get("wlasciciel"),
        Some(&json!({"imie": "Ewa"}))
    );

    let saved = read(&tmp);
    assert_eq!(saved["pokoje"][0]["numer"], json!(5));
    assert_eq!(
        saved["pokoje"][0]["lokalizacja"],
        json!({"miasto": "Kraków", "ulica": "Długa", "numer_domu": "12a"})
    );
}

#[test]
fn missing_file_gives_empty_inventory() {
    let tmp = TempDir::new().unwrap();

    let inventory = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();

    assert!(inventory.is_empty());
    assert_eq!(inventory.load_outcome(), LoadOutcome::Missing);
    assert!(!tmp.path().join("data.json").exists());
}

#[test]
fn malformed_file_gives_empty_inventory() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("data.json"), "{ not json").unwrap();

    let inventory = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();

    assert!(inventory.is_empty());
    assert_eq!(inventory.load_outcome(), LoadOutcome::Malformed);
}

#[test]
fn document_without_rooms_key_is_empty() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, &json!({"wersja": 1}));

    let inventory = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();

    assert!(inventory.is_empty());
    assert_eq!(inventory.load_outcome(), LoadOutcome::Read);
}

#[test_case(json!({"pokoje": {"numer": 1}}); "rooms not an array")]
#[test_case(json!({"pokoje": [{"numer": 1}]}); "missing rent")]
#[test_case(json!({"pokoje": [{"numer": 1, "czynsz": -10}]}); "negative rent")]
#[test_case(json!({"pokoje": [{"numer": "one", "czynsz": 10}]}); "number not an integer")]
fn invalid_rooms_are_rejected(document: Value) {
    let tmp = TempDir::new().unwrap();
    write(&tmp, &document);

    let error = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap_err();

    assert!(matches!(error, Error::Data(_)));
}

#[test]
fn entries_without_location_sit_at_the_origin() {
    let tmp = TempDir::new().unwrap();
    write(&tmp, &json!({"pokoje": [{"numer": 1, "czynsz": 100}]}));

    let inventory = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();

    let room = &inventory.rooms()[0];
    assert_eq!(room.location(), &Location::default());
    assert!(room.is_vacant());
    assert!(!room.is_premium());
}

#[test_case(KeyPolicy::Number, json!([1.0, 2.0]) => true; "same number rejected by number policy")]
#[test_case(KeyPolicy::NumberAndLocation, json!([1.0, 2.0]) => false; "different location accepted by pair policy")]
#[test_case(KeyPolicy::NumberAndLocation, json!([0.0, 0.0]) => true; "same pair rejected")]
fn duplicate_entries_on_load(policy: KeyPolicy, second_location: Value) -> bool {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp,
        &json!({"pokoje": [
            {"numer": 1, "czynsz": 100, "lokalizacja": [0.0, 0.0]},
            {"numer": 1, "czynsz": 200, "lokalizacja": second_location},
        ]}),
    );

    match Inventory::load(store(&tmp), policy) {
        Ok(inventory) => {
            assert_eq!(inventory.len(), 2);
            false
        }
        Err(Error::Data(DataError::Duplicate { index: 1, .. })) => true,
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_add_leaves_file_untouched() {
    let tmp = TempDir::new().unwrap();
    let mut inventory = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();
    inventory
        .add(NewRoom::new(1, 1000.0, Location::default()))
        .unwrap();
    inventory.save().unwrap();
    let before = read(&tmp);

    let mut inventory = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();
    let error = inventory
        .add(NewRoom::new(1, 1200.0, Location::coordinates(3.0, 4.0)))
        .unwrap_err();
    assert!(matches!(error, Error::DuplicateKey(_)));
    inventory.save().unwrap();

    assert_eq!(read(&tmp), before);
}

#[test]
fn rejected_coordinates_never_reach_the_file() {
    let tmp = TempDir::new().unwrap();
    let mut inventory = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();
    inventory
        .add(NewRoom::new(1, 1000.0, Location::coordinates(10.0, 20.0)))
        .unwrap();

    let error = inventory
        .add(NewRoom::new(
            2,
            1000.0,
            Location::coordinates(f64::NAN, f64::INFINITY),
        ))
        .unwrap_err();
    assert!(matches!(
        error,
        Error::Validation(ValidationError::Location(_))
    ));
    inventory.save().unwrap();

    let reloaded = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.rooms(), inventory.rooms());
}

#[test]
fn edits_persist() {
    let tmp = TempDir::new().unwrap();
    let mut inventory = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();
    inventory
        .add(
            NewRoom::new(2, 1500.0, Location::default())
                .premium(vec!["WiFi".to_string()])
                .with_tenant(Tenant::new("Anna", "Nowak", "anna@example.com")),
        )
        .unwrap();
    inventory
        .edit(
            2,
            None,
            RoomUpdate::default()
                .rent(1600.0)
                .vacate()
                .amenities(vec!["Sauna".to_string()]),
        )
        .unwrap();
    inventory.save().unwrap();

    let reloaded = Inventory::load(store(&tmp), KeyPolicy::Number).unwrap();
    let room = reloaded.get(2, None).unwrap();

    assert!((room.rent().amount() - 1600.0).abs() < f64::EPSILON);
    assert!(room.is_vacant());
    assert_eq!(room.amenities(), Some(["Sauna".to_string()].as_slice()));
}
