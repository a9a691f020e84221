//! Declarative configuration loaded from files.

use crate::fixtures::Contact;
use api_mock::mock_generator::ConfigError;
use api_mock::{MockConfig, MockFactory, RuleRegistry};
use std::io::Write;
use std::sync::Arc;

fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn registry() -> Arc<RuleRegistry> {
    let registry = RuleRegistry::new();
    registry.register_type::<Contact>();
    Arc::new(registry)
}

#[test]
fn test_yaml_file_rules_apply() {
    let file = write_config(
        ".yaml",
        r#"
seed: 11
default_rules:
  name:
    type: static
    value: Config Name
type_rules:
  Contact:
    email:
      type: pattern
      pattern: "{word}@example.com"
"#,
    );
    let config = MockConfig::from_file(file.path()).unwrap();
    let factory = MockFactory::with_config(registry(), config).unwrap();

    let contact: Contact = factory.create_mock_object().unwrap();
    assert_eq!(contact.name, "Config Name");
    assert!(contact.email.ends_with("@example.com"));
    assert!(!contact.email.contains('{'));
}

#[test]
fn test_toml_file_rules_apply() {
    let file = write_config(
        ".toml",
        r#"
nested_count = 2

[type_rules.Contact.name]
type = "one_of"
values = ["Ann", "Bob"]
"#,
    );
    let config = MockConfig::from_file(file.path()).unwrap();
    let factory = MockFactory::with_config(registry(), config).unwrap();
    assert_eq!(factory.nested_count(), 2);

    for contact in factory.create_mock_objects::<Contact>(10).unwrap() {
        assert!(contact.name == "Ann" || contact.name == "Bob");
    }
}

#[test]
fn test_same_seed_same_sequence() {
    let config = MockConfig::from_yaml("seed: 99").unwrap();
    let a = MockFactory::with_config(registry(), config.clone()).unwrap();
    let b = MockFactory::with_config(registry(), config).unwrap();

    let first: Vec<Contact> = a.create_mock_objects(5).unwrap();
    let second: Vec<Contact> = b.create_mock_objects(5).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_type_rejected() {
    let config = MockConfig::from_yaml(
        r#"
type_rules:
  Ghost:
    name:
      type: word
"#,
    )
    .unwrap();
    let result = MockFactory::with_config(registry(), config);
    assert!(matches!(result, Err(ConfigError::UnknownType(ref name)) if name == "Ghost"));
}

#[test]
fn test_invalid_file_reports_parse_error() {
    let file = write_config(".yaml", "nested_count: [not, a, number]");
    assert!(matches!(
        MockConfig::from_file(file.path()),
        Err(ConfigError::Yaml(_))
    ));
}
