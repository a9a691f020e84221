//! Engine configuration.
//!
//! All settings have defaults, so an empty file is a valid configuration.
//!
//! ```yaml
//! nested_count: 20
//! seed: 42
//! collection: { min: 1, max: 5 }
//! int_range: { min: 0, max: 100 }
//! default_rules:
//!   name:
//!     type: full_name
//! type_rules:
//!   Contact:
//!     email:
//!       type: pattern
//!       pattern: "{word}@example.com"
//! ```

use crate::error::ConfigError;
use crate::registry::RuleRegistry;
use crate::rules::{Rule, RuleSpec};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Default nesting budget for top-level creation.
pub const DEFAULT_NESTED_COUNT: i32 = 20;

/// Inclusive value range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> ValueRange<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd + std::fmt::Display> ValueRange<T> {
    fn check(&self, name: &str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "{name}: min {} is greater than max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Synthesis settings and declarative rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Nesting budget used when a call does not pass one
    pub nested_count: i32,

    /// Element count of structurally synthesized collections
    pub collection: ValueRange<usize>,

    pub short_range: ValueRange<i16>,
    pub int_range: ValueRange<i32>,
    pub long_range: ValueRange<i64>,

    /// Range for floats and decimals
    pub float_range: ValueRange<f64>,

    /// Dates and timestamps fall within this many days before now
    pub date_window_days: u32,

    /// Fixed seed for reproducible call sequences
    pub seed: Option<u64>,

    /// Rules shared by every type, keyed by property name
    pub default_rules: IndexMap<String, RuleSpec>,

    /// Per-type rules, keyed by type name then property name
    pub type_rules: IndexMap<String, IndexMap<String, RuleSpec>>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            nested_count: DEFAULT_NESTED_COUNT,
            collection: ValueRange::new(1, 5),
            short_range: ValueRange::new(0, 100),
            int_range: ValueRange::new(0, 100),
            long_range: ValueRange::new(0, 1000),
            float_range: ValueRange::new(0.0, 100.0),
            date_window_days: 365,
            seed: None,
            default_rules: IndexMap::new(),
            type_rules: IndexMap::new(),
        }
    }
}

impl MockConfig {
    /// Load config from a file. `.toml` files are parsed as TOML, anything
    /// else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::from_toml(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse and validate config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document parses as null rather than an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the synthesizer cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nested_count < 0 {
            return Err(ConfigError::Invalid(format!(
                "nested_count must not be negative, got {}",
                self.nested_count
            )));
        }
        self.collection.check("collection")?;
        if self.collection.max == 0 {
            return Err(ConfigError::Invalid(
                "collection: max must be at least 1".to_string(),
            ));
        }
        self.short_range.check("short_range")?;
        self.int_range.check("int_range")?;
        self.long_range.check("long_range")?;
        if !(self.float_range.min.is_finite() && self.float_range.max.is_finite()) {
            return Err(ConfigError::Invalid(
                "float_range: bounds must be finite".to_string(),
            ));
        }
        self.float_range.check("float_range")?;

        let type_specs = self
            .type_rules
            .iter()
            .flat_map(|(type_name, rules)| rules.iter().map(move |(p, s)| (Some(type_name), p, s)));
        let all_specs = self
            .default_rules
            .iter()
            .map(|(p, s)| (None, p, s))
            .chain(type_specs);
        for (type_name, property, spec) in all_specs {
            spec.validate().map_err(|reason| {
                let location = match type_name {
                    Some(t) => format!("{t}.{property}"),
                    None => property.clone(),
                };
                ConfigError::Invalid(format!("rule '{location}': {reason}"))
            })?;
        }
        Ok(())
    }

    /// Install the declarative rules into `registry`.
    ///
    /// Every type named under `type_rules` must already be registered. No
    /// rule is installed when any type name is unknown.
    pub fn apply_to(&self, registry: &RuleRegistry) -> Result<(), ConfigError> {
        let mut handles = Vec::with_capacity(self.type_rules.len());
        for (type_name, rules) in &self.type_rules {
            let handle = registry
                .type_handle(type_name)
                .ok_or_else(|| ConfigError::UnknownType(type_name.clone()))?;
            handles.push((handle, rules));
        }

        for (property, spec) in &self.default_rules {
            registry.add_default(Rule::new(property.as_str(), spec.to_generator()));
        }

        for (handle, rules) in handles {
            let descriptor = handle.descriptor();
            for (property, spec) in rules {
                if descriptor.field(property).is_none() {
                    warn!(
                        "Type {} has no field '{}'; the configured rule will never apply",
                        handle.name(),
                        property
                    );
                }
                registry.add_type_rule(handle, Rule::new(property.as_str(), spec.to_generator()));
            }
        }

        debug!(
            "Applied {} default and {} typed rule sets from config",
            self.default_rules.len(),
            self.type_rules.len()
        );
        Ok(())
    }
}
