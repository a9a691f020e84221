//! Core types for the api-mock synthesis engine.
//!
//! This crate provides the foundational types shared by the generator and
//! by every crate that declares mockable models:
//!
//! - [`TypeShape`] - Structural classification of field types
//! - [`ObjectDescriptor`] - Field layout of a structured type
//! - [`MockValue`] - Dynamic values produced by rules and synthesis
//! - [`Mockable`] / [`MockField`] - The introspection seam
//! - [`PaginationMetadata`] / [`Links`] - Response envelope attachments
//!
//! # Architecture
//!
//! ```text
//! mock-core (this crate)
//!    │
//!    ├─── mock-generator   (synthesizers, rule registry, factory)
//!    │
//!    └─── api-mock         (demo models, mockgen CLI)
//! ```
//!
//! # Example
//!
//! ```rust
//! use mock_core::{mockable, Mockable};
//!
//! mockable! {
//!     #[derive(Debug, Default)]
//!     pub struct Contact {
//!         pub name: String,
//!         pub email: String,
//!     }
//! }
//!
//! let descriptor = Contact::describe();
//! assert_eq!(descriptor.field_names(), vec!["name", "email"]);
//! ```

pub mod envelope;
pub mod introspect;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use envelope::{Links, PaginationMetadata, ResponseEnvelope};
pub use introspect::{take_field, MockField, Mockable, Stack};
pub use types::{
    ContainerShape, EnumDescriptor, FieldDescriptor, ObjectDescriptor, ScalarKind, TypeHandle,
    TypeShape,
};
pub use values::{ConversionError, MockObject, MockValue};
