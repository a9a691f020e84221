//! api-mock
//!
//! Mock data synthesis for API documentation, test doubles and example
//! payloads. Given a structured type, the engine produces a populated
//! instance whose fields come from registered rules where present and from
//! structural synthesis otherwise.
//!
//! # Crates
//!
//! - `mock_core` - type descriptors, the dynamic value model, the
//!   `mockable!` macro and response envelope models
//! - `mock_generator` - synthesizers, rule registry, configuration builder,
//!   declarative configuration and the [`MockFactory`]
//!
//! # CLI Usage
//!
//! ```bash
//! # List the demo types
//! mockgen types
//!
//! # Three hotels, reproducibly
//! mockgen generate Hotel --count 3 --seed 42
//!
//! # Property map of a booking with declarative overrides
//! mockgen fields Booking --config mock.yaml
//! ```

pub mod models;

pub use mock_core;
pub use mock_generator;

pub use mock_core::{mockable, MockValue, Mockable, ResponseEnvelope};
pub use mock_generator::{MockConfig, MockError, MockFactory, RuleRegistry};
pub use models::demo_registry;
