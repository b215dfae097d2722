use patron_core::{new_registry, AddPatronError, PatronRepository, PatronValidationError};
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

#[test]
fn add_then_search_by_id_returns_rounded_patron() {
    let mut controller = new_registry();
    assert!(controller.add_patron("1234567", "Jane", "123 Main St", dec("12.345")));

    let found = controller.search_by_id("1234567").unwrap();
    assert_eq!(found.name(), "Jane");
    assert_eq!(found.fine(), dec("12.35"));
    assert!(controller.search_by_id("7654321").is_none());
}

#[test]
fn invalid_add_returns_false_and_stores_nothing() {
    let mut controller = new_registry();
    assert!(!controller.add_patron("123", "Jane", "Main", Decimal::ONE));
    assert!(!controller.add_patron("1234567", "Jane", "Main", dec("-1")));
    assert!(controller.repository().is_empty());
}

#[test]
fn duplicate_id_keeps_first_patron() {
    let mut controller = new_registry();
    assert!(controller.add_patron("1234567", "Jane", "Main", Decimal::ONE));
    assert!(!controller.add_patron("1234567", "Tom", "Oak", Decimal::TEN));

    let all = controller.list_patrons();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name(), "Jane");
}

#[test]
fn try_add_reports_reason() {
    let mut controller = new_registry();
    controller
        .try_add_patron("1234567", "Jane", "Main", Decimal::ONE)
        .unwrap();

    assert_eq!(
        controller.try_add_patron("1234567", "Tom", "Oak", Decimal::ONE),
        Err(AddPatronError::DuplicateId("1234567".to_string()))
    );
    assert_eq!(
        controller.try_add_patron("7654321", "Tom", " ", Decimal::ONE),
        Err(AddPatronError::Validation(PatronValidationError::InvalidAddress))
    );
}

#[test]
fn remove_unknown_id_returns_false_and_keeps_size() {
    let mut controller = new_registry();
    controller.add_patron("1234567", "Jane", "Main", Decimal::ONE);

    assert!(!controller.remove_patron("7654321"));
    assert_eq!(controller.list_patrons().len(), 1);

    assert!(controller.remove_patron("1234567"));
    assert!(controller.list_patrons().is_empty());
    assert!(!controller.remove_patron("1234567"));
}

#[test]
fn list_is_sorted_by_id_and_tracks_adds_minus_removes() {
    let mut controller = new_registry();
    for id in ["5000000", "0000001", "9999999", "1234567"] {
        assert!(controller.add_patron(id, "Reader", "Main", Decimal::ZERO));
    }
    controller.remove_patron("9999999");

    let ids = controller
        .list_patrons()
        .iter()
        .map(|p| p.id().to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["0000001", "1234567", "5000000"]);
}

#[test]
fn search_by_name_is_case_insensitive_substring() {
    let mut controller = new_registry();
    controller.add_patron("3000000", "bobby", "Elm", Decimal::ZERO);
    controller.add_patron("1000000", "Bob Smith", "Main", Decimal::ZERO);
    controller.add_patron("2000000", "Alice", "Oak", Decimal::ZERO);

    let names = controller
        .search_by_name("bob")
        .iter()
        .map(|p| p.name().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Bob Smith", "bobby"]);

    assert_eq!(controller.search_by_name("SMITH").len(), 1);
    assert!(controller.search_by_name("carol").is_empty());
}
