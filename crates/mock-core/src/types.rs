//! Type descriptors for the api-mock synthesis engine.
//!
//! This module defines `TypeShape`, the closed classification of every type the
//! engine knows how to synthesize, and the per-object descriptors that
//! [`Mockable`](crate::introspect::Mockable) implementations derive on demand.
//!
//! # Shapes
//!
//! ```text
//! TypeShape
//!    ├── Scalar(ScalarKind)      string, integers, floats, decimal, bool, uuid, dates
//!    ├── Enum(EnumDescriptor)    fieldless enum with its variant names
//!    ├── Optional(TypeShape)     Option<T>, unwrapped before synthesis
//!    ├── Container(ContainerShape)
//!    │      Array | Sequence | Set | Queue | Stack | Map | Tuple2
//!    ├── Object(TypeHandle)      nested structured type, described lazily
//!    └── Opaque(name)            types the introspector cannot classify
//! ```
//!
//! Descriptors are never cached. A nested object is referenced through a
//! [`TypeHandle`], whose descriptor is only produced when the synthesizer
//! actually descends into it, so self-referential types can be described.

use crate::introspect::Mockable;
use crate::values::{ConversionError, MockObject, MockValue};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Terminal value kinds handled by the primitive synthesizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// Boolean value
    Bool,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit IEEE 754 floating point
    Float32,
    /// 64-bit IEEE 754 floating point
    Float64,
    /// Exact decimal
    Decimal,
    /// Single character
    Char,
    /// UTF-8 string
    String,
    /// UUID (128-bit)
    Uuid,
    /// Timestamp with timezone (UTC)
    DateTime,
    /// Date only (YYYY-MM-DD)
    Date,
}

impl ScalarKind {
    /// Short lowercase name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::DateTime => "date_time",
            Self::Date => "date",
        }
    }

    /// Whether a value of this runtime kind can be stored in a field of this kind.
    ///
    /// Integers and floats widen: an `Int16` fits an `Int32` or `Int64` field,
    /// a `Float32` fits a `Float64` field.
    pub fn accepts(&self, value: &MockValue) -> bool {
        matches!(
            (self, value),
            (Self::Bool, MockValue::Bool(_))
                | (Self::Int16, MockValue::Int16(_))
                | (Self::Int32, MockValue::Int16(_) | MockValue::Int32(_))
                | (
                    Self::Int64,
                    MockValue::Int16(_) | MockValue::Int32(_) | MockValue::Int64(_)
                )
                | (Self::Float32, MockValue::Float32(_))
                | (Self::Float64, MockValue::Float32(_) | MockValue::Float64(_))
                | (Self::Decimal, MockValue::Decimal(_))
                | (Self::Char, MockValue::Char(_))
                | (Self::String, MockValue::String(_))
                | (Self::Uuid, MockValue::Uuid(_))
                | (Self::DateTime, MockValue::DateTime(_))
                | (Self::Date, MockValue::Date(_))
        )
    }
}

/// Description of a fieldless enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    /// Enum type name
    pub type_name: &'static str,
    /// Variant names in declaration order
    pub variants: Vec<&'static str>,
}

impl EnumDescriptor {
    /// Create a new enum descriptor.
    pub fn new(type_name: &'static str, variants: Vec<&'static str>) -> Self {
        Self {
            type_name,
            variants,
        }
    }

    /// Look up a variant by name, returning the canonical `'static` name.
    pub fn variant(&self, name: &str) -> Option<&'static str> {
        self.variants.iter().copied().find(|v| *v == name)
    }
}

/// Container classification, decided once by the introspector.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerShape {
    /// Boxed slice (`Box<[T]>`)
    Array(Box<TypeShape>),
    /// Growable sequence (`Vec<T>`)
    Sequence(Box<TypeShape>),
    /// Unordered set (`HashSet<T>`, `BTreeSet<T>`)
    Set(Box<TypeShape>),
    /// FIFO queue (`VecDeque<T>`)
    Queue(Box<TypeShape>),
    /// LIFO stack ([`Stack<T>`](crate::introspect::Stack))
    Stack(Box<TypeShape>),
    /// Key to value mapping (`HashMap<K, V>`, `BTreeMap<K, V>`)
    Map {
        /// Key type
        key: Box<TypeShape>,
        /// Value type
        value: Box<TypeShape>,
    },
    /// Pair of independently typed values (`(A, B)`)
    Tuple2(Box<TypeShape>, Box<TypeShape>),
}

impl ContainerShape {
    /// Short name of the container kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Array(_) => "array",
            Self::Sequence(_) => "sequence",
            Self::Set(_) => "set",
            Self::Queue(_) => "queue",
            Self::Stack(_) => "stack",
            Self::Map { .. } => "map",
            Self::Tuple2(..) => "tuple",
        }
    }

    /// Element type of single-parameter containers.
    pub fn element(&self) -> Option<&TypeShape> {
        match self {
            Self::Array(element)
            | Self::Sequence(element)
            | Self::Set(element)
            | Self::Queue(element)
            | Self::Stack(element) => Some(element),
            Self::Map { .. } | Self::Tuple2(..) => None,
        }
    }

    /// False when any component type is opaque.
    ///
    /// Containers over unresolved component types are synthesized empty.
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Map { key, value } => !key.is_opaque() && !value.is_opaque(),
            Self::Tuple2(first, second) => !first.is_opaque() && !second.is_opaque(),
            _ => self.element().is_some_and(|e| !e.is_opaque()),
        }
    }
}

/// Structural classification of a field's declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    /// Terminal value
    Scalar(ScalarKind),
    /// Fieldless enum
    Enum(EnumDescriptor),
    /// Optional wrapper around another shape
    Optional(Box<TypeShape>),
    /// Collection or tuple
    Container(ContainerShape),
    /// Nested structured type
    Object(TypeHandle),
    /// Type the introspector cannot classify
    Opaque(&'static str),
}

impl TypeShape {
    /// Strip any number of `Optional` wrappers.
    pub fn unwrap_optional(&self) -> &TypeShape {
        match self {
            Self::Optional(inner) => inner.unwrap_optional(),
            other => other,
        }
    }

    /// Scalars and enums are synthesized regardless of the nesting budget.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self.unwrap_optional(),
            Self::Scalar(_) | Self::Enum(_)
        )
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self.unwrap_optional(), Self::Opaque(_))
    }

    /// The container shape, or `None` if this is not a container.
    pub fn container(&self) -> Option<&ContainerShape> {
        match self.unwrap_optional() {
            Self::Container(shape) => Some(shape),
            _ => None,
        }
    }

    /// Whether `value` is assignable to a field of this shape.
    pub fn accepts(&self, value: &MockValue) -> bool {
        match self {
            Self::Scalar(kind) => kind.accepts(value),
            Self::Enum(descriptor) => match value {
                MockValue::Enum(variant) => descriptor.variant(variant).is_some(),
                MockValue::String(s) => descriptor.variant(s).is_some(),
                _ => false,
            },
            Self::Optional(inner) => value.is_null() || inner.accepts(value),
            Self::Container(shape) => container_accepts(shape, value),
            Self::Object(handle) => {
                matches!(value, MockValue::Object(object) if object.type_name() == handle.name())
            }
            Self::Opaque(_) => !value.is_null(),
        }
    }
}

fn container_accepts(shape: &ContainerShape, value: &MockValue) -> bool {
    match (shape, value) {
        (ContainerShape::Map { key, value: val }, MockValue::Map(entries)) => entries
            .iter()
            .all(|(k, v)| key.accepts(k) && val.accepts(v)),
        (ContainerShape::Tuple2(first, second), MockValue::Tuple(a, b)) => {
            first.accepts(a) && second.accepts(b)
        }
        (shape, MockValue::Array(items)) => match shape.element() {
            Some(element) => items.iter().all(|item| element.accepts(item)),
            None => false,
        },
        _ => false,
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{}", kind.name()),
            Self::Enum(descriptor) => write!(f, "enum {}", descriptor.type_name),
            Self::Optional(inner) => write!(f, "optional<{inner}>"),
            Self::Container(ContainerShape::Map { key, value }) => write!(f, "map<{key}, {value}>"),
            Self::Container(ContainerShape::Tuple2(a, b)) => write!(f, "tuple<{a}, {b}>"),
            Self::Container(shape) => match shape.element() {
                Some(element) => write!(f, "{}<{element}>", shape.kind()),
                None => write!(f, "{}", shape.kind()),
            },
            Self::Object(handle) => write!(f, "{}", handle.name()),
            Self::Opaque(name) => write!(f, "opaque {name}"),
        }
    }
}

/// Runtime handle for a [`Mockable`] type.
///
/// The handle is `Copy` and cheap to pass around; it carries the type's name,
/// its `TypeId`, a function deriving its descriptor, and a type-erased
/// constructor used by the non-generic creation path.
#[derive(Clone, Copy)]
pub struct TypeHandle {
    name: &'static str,
    type_id: TypeId,
    describe: fn() -> ObjectDescriptor,
    construct: fn(MockObject) -> Result<Box<dyn Any + Send>, ConversionError>,
}

impl TypeHandle {
    /// Handle for `T`.
    pub fn of<T: Mockable>() -> Self {
        Self {
            name: T::TYPE_NAME,
            type_id: TypeId::of::<T>(),
            describe: T::describe,
            construct: construct_erased::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Derive the type's descriptor. Not cached.
    pub fn descriptor(&self) -> ObjectDescriptor {
        (self.describe)()
    }

    /// Build a boxed instance of the type from synthesized field values.
    pub fn construct(&self, object: MockObject) -> Result<Box<dyn Any + Send>, ConversionError> {
        (self.construct)(object)
    }
}

fn construct_erased<T: Mockable>(
    object: MockObject,
) -> Result<Box<dyn Any + Send>, ConversionError> {
    T::from_mock_object(object).map(|value| Box::new(value) as Box<dyn Any + Send>)
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeHandle").field(&self.name).finish()
    }
}

/// A single field of a structured type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Property name, used as the rule lookup key
    pub name: &'static str,
    /// Declared shape of the field
    pub shape: TypeShape,
    /// Read-only fields are skipped by synthesis and keep their default
    pub writable: bool,
}

impl FieldDescriptor {
    /// Create a writable field descriptor.
    pub fn new(name: &'static str, shape: TypeShape) -> Self {
        Self {
            name,
            shape,
            writable: true,
        }
    }

    /// Create a read-only field descriptor.
    pub fn read_only(name: &'static str, shape: TypeShape) -> Self {
        Self {
            name,
            shape,
            writable: false,
        }
    }
}

/// Field layout of a structured type.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDescriptor {
    /// Type name
    pub type_name: &'static str,
    /// Fields in declaration order
    pub fields: Vec<FieldDescriptor>,
    /// Response envelopes have their `pagination` and `links` fields cleared
    pub response_envelope: bool,
}

impl ObjectDescriptor {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
            response_envelope: false,
        }
    }

    /// Append a field.
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Mark the type as a response envelope.
    pub fn as_response_envelope(mut self) -> Self {
        self.response_envelope = true;
        self
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that synthesis writes to.
    pub fn writable_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.writable)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}
