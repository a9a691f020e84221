//! Mock data synthesis for the api-mock engine.
//!
//! This crate turns the type descriptors of `mock-core` into populated
//! values. Field values come from rules when one is registered for the
//! property, and from structural synthesis by shape otherwise.
//!
//! # Architecture
//!
//! ```text
//! MockConfig (YAML / TOML)        MockConfigurationBuilder<T>
//!        │                                 │
//!        ▼                                 ▼
//! ┌──────────────────────────────────────────────┐
//! │  RuleRegistry                                │
//! │   - default rules    (property → rule)       │
//! │   - per-type rules   (type, property → rule) │
//! │   - type catalog     (name → TypeHandle)     │
//! └──────────────────────┬───────────────────────┘
//!                        │ effective_rules(T)
//!                        ▼
//! ┌──────────────────┐   ┌──────────────────────┐
//! │   MockFactory    │──▶│  ObjectSynthesizer   │──▶ container / primitive
//! │  - seeded RNG    │   │  - nesting budget    │
//! └──────────────────┘   └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use mock_core::mockable;
//! use mock_generator::{Faker, MockFactory, RuleRegistry};
//! use std::sync::Arc;
//!
//! mockable! {
//!     #[derive(Debug, Default)]
//!     pub struct Contact {
//!         pub name: String,
//!         pub email: String,
//!     }
//! }
//!
//! let registry = Arc::new(RuleRegistry::with_default_rules());
//! registry.configure::<Contact>(|b| b.for_property("name", |_: &mut Faker<'_>| "Alice"));
//!
//! let factory = MockFactory::new(registry);
//! let contact: Contact = factory.create_mock_object().unwrap();
//! assert_eq!(contact.name, "Alice");
//! ```
//!
//! # Failing rules
//!
//! A rule generator that panics is caught per field and logged at `error`.
//! The process panic hook still runs first, so with the default hook the panic
//! message also reaches stderr. Replace it with `std::panic::set_hook` to keep
//! only the structured log.
//!
//! # Declarative rules
//!
//! Rules in configuration files use these `type` tags:
//!
//! - `full_name`, `first_name`, `last_name`, `email`, `phone`
//! - `address`, `city`, `region`, `postal_code`, `country`, `company_name`
//! - `word`, `sentence`, `uuid_v4`
//! - `int_range`, `float_range`, `weighted_bool`, `one_of`, `static`
//! - `pattern` - Pattern strings with placeholders (`{uuid}`, `{word}`, `{rand:N}`)
//! - `timestamp_range`, `timestamp_now`, `null`

pub mod builder;
pub mod config;
pub mod error;
pub mod factory;
pub mod faker;
pub mod generators;
pub mod registry;
pub mod rules;
pub mod synthesizer;

// Re-exports for convenience
pub use builder::{DictionaryValues, MockConfigurationBuilder, DEFAULT_LIST_COUNT};
pub use config::{MockConfig, ValueRange, DEFAULT_NESTED_COUNT};
pub use error::{ConfigError, MockError};
pub use factory::MockFactory;
pub use faker::Faker;
pub use registry::RuleRegistry;
pub use rules::{into_generator, Generator, Rule, RuleSet, RuleSpec};
pub use synthesizer::ObjectSynthesizer;
