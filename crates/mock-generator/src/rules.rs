//! Rules: named value generators consulted before structural synthesis.
//!
//! A [`Rule`] pairs a property name with a [`Generator`]. Rules are either
//! registered in code as closures, or declared in configuration files as a
//! [`RuleSpec`] and turned into closures with [`RuleSpec::to_generator`].

use crate::faker::Faker;
use crate::generators::{numeric, pattern, timestamp};
use indexmap::IndexMap;
use mock_core::MockValue;
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;
use std::fmt;
use std::sync::Arc;

/// A value generator. Receives the per-call random source and nesting budget.
pub type Generator = Arc<dyn Fn(&mut Faker<'_>) -> MockValue + Send + Sync>;

/// Rules keyed by property name, in registration order.
pub type RuleSet = IndexMap<String, Rule>;

/// Wrap a closure returning anything convertible to a [`MockValue`].
pub fn into_generator<G, V>(generator: G) -> Generator
where
    G: Fn(&mut Faker<'_>) -> V + Send + Sync + 'static,
    V: Into<MockValue>,
{
    Arc::new(move |faker: &mut Faker<'_>| generator(faker).into())
}

/// A generator bound to a property name, optionally owned by one type.
#[derive(Clone)]
pub struct Rule {
    property: String,
    owner: Option<&'static str>,
    generator: Generator,
}

impl Rule {
    pub fn new(property: impl Into<String>, generator: Generator) -> Self {
        Self {
            property: property.into(),
            owner: None,
            generator,
        }
    }

    /// Build a rule from a closure.
    pub fn from_fn<G, V>(property: impl Into<String>, generator: G) -> Self
    where
        G: Fn(&mut Faker<'_>) -> V + Send + Sync + 'static,
        V: Into<MockValue>,
    {
        Self::new(property, into_generator(generator))
    }

    /// Mark the rule as belonging to a type's rule set.
    pub fn owned_by(mut self, type_name: &'static str) -> Self {
        self.owner = Some(type_name);
        self
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    /// Owning type, `None` for default rules.
    pub fn owner(&self) -> Option<&'static str> {
        self.owner
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Run the generator.
    pub fn generate(&self, faker: &mut Faker<'_>) -> MockValue {
        (self.generator)(faker)
    }

    /// Whether both rules share the same generator instance.
    pub fn same_generator(&self, other: &Rule) -> bool {
        Arc::ptr_eq(&self.generator, &other.generator)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("property", &self.property)
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// Declarative rule, as written in configuration files.
///
/// ```yaml
/// default_rules:
///   name:
///     type: full_name
///   score:
///     type: int_range
///     min: 1
///     max: 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleSpec {
    /// Full person name
    FullName,
    FirstName,
    LastName,
    Email,
    Phone,
    /// Street address
    Address,
    City,
    /// State or province
    Region,
    PostalCode,
    Country,
    CompanyName,
    /// Single lorem word
    Word,
    /// Lorem sentence
    Sentence,
    UuidV4,

    /// Random integers in a range (inclusive)
    IntRange {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// Random floats in a range (inclusive)
    FloatRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Weighted boolean values
    WeightedBool {
        /// Weight for true value (0.0 to 1.0)
        true_weight: f64,
    },

    /// Random selection from a pool of values
    OneOf {
        /// Pool of values to select from
        values: Vec<YamlValue>,
    },

    /// Always the same value
    Static {
        /// The value
        value: YamlValue,
    },

    /// String with `{uuid}`, `{word}` and `{rand:N}` placeholders
    Pattern {
        /// Pattern string
        pattern: String,
    },

    /// Random timestamps in a range
    TimestampRange {
        /// Start timestamp (ISO 8601)
        start: String,
        /// End timestamp (ISO 8601)
        end: String,
    },

    /// Current timestamp at generation time
    TimestampNow,

    /// Always null; only fits optional fields
    Null,
}

impl RuleSpec {
    /// Check ranges and weights.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::IntRange { min, max } if min > max => {
                Err(format!("int_range min {min} is greater than max {max}"))
            }
            Self::FloatRange { min, max } if !(min.is_finite() && max.is_finite()) || min > max => {
                Err(format!("float_range [{min}, {max}] is not a valid range"))
            }
            Self::WeightedBool { true_weight } if !(0.0..=1.0).contains(true_weight) => Err(format!(
                "weighted_bool true_weight {true_weight} is outside [0, 1]"
            )),
            Self::OneOf { values } if values.is_empty() => {
                Err("one_of requires at least one value".to_string())
            }
            Self::TimestampRange { start, end }
                if timestamp::parse_timestamp(start).is_none()
                    || timestamp::parse_timestamp(end).is_none() =>
            {
                Err(format!("timestamp_range bounds '{start}'..'{end}' are not ISO 8601"))
            }
            _ => Ok(()),
        }
    }

    /// Produce one value.
    pub fn generate(&self, faker: &mut Faker<'_>) -> MockValue {
        match self {
            Self::FullName => faker.full_name().into(),
            Self::FirstName => faker.first_name().into(),
            Self::LastName => faker.last_name().into(),
            Self::Email => faker.email().into(),
            Self::Phone => faker.phone().into(),
            Self::Address => faker.address().into(),
            Self::City => faker.city().into(),
            Self::Region => faker.region().into(),
            Self::PostalCode => faker.postal_code().into(),
            Self::Country => faker.country().into(),
            Self::CompanyName => faker.company_name().into(),
            Self::Word => faker.word().into(),
            Self::Sentence => faker.sentence().into(),
            Self::UuidV4 => faker.uuid().into(),
            Self::IntRange { min, max } => {
                narrow_int(numeric::generate_long_range(faker.rng(), *min, *max), *min, *max)
            }
            Self::FloatRange { min, max } => numeric::generate_float_range(faker.rng(), *min, *max),
            Self::WeightedBool { true_weight } => MockValue::Bool(faker.weighted_bool(*true_weight)),
            Self::OneOf { values } => faker
                .pick(values)
                .map_or(MockValue::Null, |v| yaml_to_mock_value(&v)),
            Self::Static { value } => yaml_to_mock_value(value),
            Self::Pattern { pattern } => pattern::generate_pattern(pattern, faker.rng()),
            Self::TimestampRange { start, end } => {
                timestamp::generate_timestamp_range(faker.rng(), start, end)
            }
            Self::TimestampNow => timestamp::generate_timestamp_now(),
            Self::Null => MockValue::Null,
        }
    }

    /// Wrap this spec in a [`Generator`].
    pub fn to_generator(&self) -> Generator {
        let spec = self.clone();
        Arc::new(move |faker: &mut Faker<'_>| spec.generate(faker))
    }
}

/// Integer ranges that fit 32 bits produce `Int32`, so they fit `i32` fields.
fn narrow_int(value: MockValue, min: i64, max: i64) -> MockValue {
    match value {
        MockValue::Int64(v) if i32::try_from(min).is_ok() && i32::try_from(max).is_ok() => {
            i32::try_from(v).map_or(MockValue::Int64(v), MockValue::Int32)
        }
        other => other,
    }
}

/// Convert a YAML value to a MockValue.
///
/// Integers that fit 32 bits become `Int32`; mappings become string-keyed
/// maps.
pub fn yaml_to_mock_value(yaml: &YamlValue) -> MockValue {
    match yaml {
        YamlValue::Null => MockValue::Null,
        YamlValue::Bool(b) => MockValue::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).map_or(MockValue::Int64(i), MockValue::Int32)
            } else if let Some(f) = n.as_f64() {
                MockValue::Float64(f)
            } else {
                MockValue::String(n.to_string())
            }
        }
        YamlValue::String(s) => MockValue::String(s.clone()),
        YamlValue::Sequence(arr) => MockValue::Array(arr.iter().map(yaml_to_mock_value).collect()),
        YamlValue::Mapping(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (k, v) in map {
                let key = match k {
                    YamlValue::String(s) => MockValue::String(s.clone()),
                    other => yaml_to_mock_value(other),
                };
                MockValue::insert_entry(&mut entries, key, yaml_to_mock_value(v));
            }
            MockValue::Map(entries)
        }
        YamlValue::Tagged(tagged) => yaml_to_mock_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockConfig;
    use crate::registry::RuleRegistry;
    use crate::synthesizer::ObjectSynthesizer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate(spec: &RuleSpec) -> MockValue {
        let registry = RuleRegistry::new();
        let config = MockConfig::default();
        let synthesizer = ObjectSynthesizer::new(&registry, &config);
        let mut rng = StdRng::seed_from_u64(42);
        let mut faker = Faker::new(&mut rng, &synthesizer, 5);
        spec.to_generator()(&mut faker)
    }

    #[test]
    fn test_parse_rule_specs() {
        let yaml = r#"
name:
  type: full_name
score:
  type: int_range
  min: 1
  max: 10
status:
  type: one_of
  values: [active, inactive]
"#;
        let rules: IndexMap<String, RuleSpec> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rules["name"], RuleSpec::FullName);
        assert_eq!(rules["score"], RuleSpec::IntRange { min: 1, max: 10 });
        assert!(matches!(rules["status"], RuleSpec::OneOf { ref values } if values.len() == 2));
    }

    #[test]
    fn test_int_range_narrows_to_int32() {
        for _ in 0..20 {
            let value = generate(&RuleSpec::IntRange { min: 1, max: 10 });
            if let MockValue::Int32(v) = value {
                assert!((1..=10).contains(&v));
            } else {
                panic!("Expected Int32 value");
            }
        }

        let wide = generate(&RuleSpec::IntRange {
            min: 5_000_000_000,
            max: 6_000_000_000,
        });
        assert!(matches!(wide, MockValue::Int64(_)));
    }

    #[test]
    fn test_static_and_one_of() {
        let value = generate(&RuleSpec::Static {
            value: YamlValue::String("Alice".to_string()),
        });
        assert_eq!(value, MockValue::from("Alice"));

        let value = generate(&RuleSpec::OneOf {
            values: vec![YamlValue::from(1), YamlValue::from(2)],
        });
        assert!(value == MockValue::Int32(1) || value == MockValue::Int32(2));
    }

    #[test]
    fn test_text_specs_produce_strings() {
        for spec in [
            RuleSpec::FullName,
            RuleSpec::Email,
            RuleSpec::Address,
            RuleSpec::PostalCode,
            RuleSpec::Sentence,
        ] {
            assert!(matches!(generate(&spec), MockValue::String(s) if !s.is_empty()));
        }
        assert!(matches!(generate(&RuleSpec::UuidV4), MockValue::Uuid(_)));
        assert_eq!(generate(&RuleSpec::Null), MockValue::Null);
    }

    #[test]
    fn test_validate() {
        assert!(RuleSpec::IntRange { min: 10, max: 1 }.validate().is_err());
        assert!(RuleSpec::WeightedBool { true_weight: 1.5 }.validate().is_err());
        assert!(RuleSpec::OneOf { values: vec![] }.validate().is_err());
        assert!(RuleSpec::TimestampRange {
            start: "yesterday".to_string(),
            end: "2024-01-01".to_string(),
        }
        .validate()
        .is_err());
        assert!(RuleSpec::FloatRange { min: 0.0, max: 1.0 }.validate().is_ok());
    }

    #[test]
    fn test_yaml_mapping_to_map() {
        let yaml: YamlValue = serde_yaml::from_str("{a: 1, b: [true, null]}").unwrap();
        let value = yaml_to_mock_value(&yaml);
        assert_eq!(
            value,
            MockValue::Map(vec![
                (MockValue::from("a"), MockValue::Int32(1)),
                (
                    MockValue::from("b"),
                    MockValue::Array(vec![MockValue::Bool(true), MockValue::Null])
                ),
            ])
        );
    }

    #[test]
    fn test_same_generator_identity() {
        let rule = Rule::from_fn("name", |_: &mut Faker<'_>| "x");
        let copy = rule.clone();
        let other = Rule::from_fn("name", |_: &mut Faker<'_>| "x");
        assert!(rule.same_generator(&copy));
        assert!(!rule.same_generator(&other));
    }
}
