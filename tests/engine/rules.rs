//! Rule resolution: overrides, precedence and tolerated mismatches.

use crate::fixtures::{bare_factory, seeded_factory, Contact};
use api_mock::mock_generator::Faker;
use api_mock::{mockable, MockValue, RuleRegistry};
use std::sync::Arc;

mockable! {
    #[derive(Debug, Default)]
    struct Scored {
        name: String,
        score: i32,
        total: i64,
        labels: Vec<String>,
    }
}

#[test]
fn test_type_rule_applies_on_every_call() {
    let factory = bare_factory();
    factory
        .registry()
        .register_type_rule::<Contact, _, _>("name", |_: &mut Faker<'_>| "Alice");

    for contact in factory.create_mock_objects::<Contact>(10).unwrap() {
        assert_eq!(contact.name, "Alice");
    }
}

#[test]
fn test_type_rule_beats_default_rule() {
    let registry = Arc::new(RuleRegistry::new());
    registry.register_default("name", |_: &mut Faker<'_>| "Default");
    registry.register_type_rule::<Contact, _, _>("name", |_: &mut Faker<'_>| "Typed");
    let factory = seeded_factory(registry);

    let contact: Contact = factory.create_mock_object().unwrap();
    assert_eq!(contact.name, "Typed");

    // Types without their own rule keep the default
    let scored: Scored = factory.create_mock_object().unwrap();
    assert_eq!(scored.name, "Default");
}

#[test]
fn test_rules_registered_between_calls_take_effect() {
    let factory = bare_factory();
    let before: Contact = factory.create_mock_object().unwrap();
    assert_ne!(before.email, "fixed@example.com");

    factory
        .registry()
        .register_type_rule::<Contact, _, _>("email", |_: &mut Faker<'_>| "fixed@example.com");
    let after: Contact = factory.create_mock_object().unwrap();
    assert_eq!(after.email, "fixed@example.com");
}

#[test]
fn test_effective_rules_lookup_is_idempotent() {
    let registry = RuleRegistry::with_default_rules();
    registry.register_type_rule::<Contact, _, _>("name", |_: &mut Faker<'_>| "Alice");

    let first = registry.effective_rules::<Contact>();
    let second = registry.effective_rules::<Contact>();
    assert_eq!(first.keys().collect::<Vec<_>>(), second.keys().collect::<Vec<_>>());
    assert!(first
        .iter()
        .all(|(property, rule)| rule.same_generator(&second[property])));
}

#[test]
fn test_mismatched_rule_falls_back_to_structure() {
    let factory = bare_factory();
    factory.registry().configure::<Scored>(|b| {
        b.for_property("score", |_: &mut Faker<'_>| "not a number")
            .for_property("name", |_: &mut Faker<'_>| 12)
    });

    let scored: Scored = factory.create_mock_object().unwrap();
    assert!((0..=100).contains(&scored.score));
    assert!(!scored.name.is_empty());
}

#[test]
fn test_narrow_integer_rule_widens_into_field() {
    let factory = bare_factory();
    factory
        .registry()
        .register_type_rule::<Scored, _, _>("total", |_: &mut Faker<'_>| 7i32);

    let scored: Scored = factory.create_mock_object().unwrap();
    assert_eq!(scored.total, 7);
}

#[test]
fn test_element_rule_fills_collection() {
    let factory = bare_factory();
    factory
        .registry()
        .register_type_rule::<Scored, _, _>("labels", |_: &mut Faker<'_>| "label");

    let scored: Scored = factory.create_mock_object().unwrap();
    assert!((1..=5).contains(&scored.labels.len()));
    assert!(scored.labels.iter().all(|l| l == "label"));
}

#[test]
fn test_panicking_rule_does_not_abort_object() {
    let factory = bare_factory();
    factory.registry().configure::<Scored>(|b| {
        b.for_property("score", |_: &mut Faker<'_>| -> i32 { panic!("generator failure") })
            .for_property("name", |_: &mut Faker<'_>| "Survivor")
    });

    let scored: Scored = factory.create_mock_object().unwrap();
    assert_eq!(scored.name, "Survivor");
    assert!((0..=100).contains(&scored.score));
}

#[test]
fn test_property_value_map_matches_rules() {
    let factory = bare_factory();
    factory
        .registry()
        .register_type_rule::<Contact, _, _>("name", |_: &mut Faker<'_>| "Alice");

    let map = factory.get_property_value_map::<Contact>(None);
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["name", "email"]);
    assert_eq!(map["name"], MockValue::from("Alice"));
    assert!(matches!(map["email"], MockValue::String(_)));
}
