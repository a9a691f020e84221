//! Value representations for the api-mock synthesis engine.
//!
//! `MockValue` is the dynamic value produced by rules and structural
//! synthesis before it is converted into a typed field through
//! [`MockField::from_mock`](crate::introspect::MockField::from_mock).

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::ser::{SerializeMap, SerializeTuple};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fmt;
use uuid::Uuid;

/// Error converting a [`MockValue`] into a typed field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Value kind does not match the field type
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: &'static str,
    },

    /// Name is not a variant of the target enum
    #[error("'{variant}' is not a variant of {type_name}")]
    UnknownVariant {
        type_name: &'static str,
        variant: String,
    },

    /// Type-specific construction failure
    #[error("{type_name} cannot be built from mock data: {reason}")]
    Invalid {
        type_name: &'static str,
        reason: String,
    },
}

impl ConversionError {
    /// Build a type mismatch error for `found`.
    pub fn mismatch(expected: impl Into<String>, found: &MockValue) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.kind(),
        }
    }
}

/// Dynamic synthesized value.
///
/// All sequential containers (arrays, sequences, sets, queues, stacks) share
/// the `Array` representation in generation order. Maps keep their entries
/// in insertion order; see [`MockValue::insert_entry`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MockValue {
    /// Absent value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// 16-bit signed integer
    Int16(i16),

    /// 32-bit signed integer
    Int32(i32),

    /// 64-bit signed integer
    Int64(i64),

    /// 32-bit floating point
    Float32(f32),

    /// 64-bit floating point
    Float64(f64),

    /// Exact decimal
    Decimal(Decimal),

    /// Single character
    Char(char),

    /// String value
    String(String),

    /// UUID value
    Uuid(Uuid),

    /// Date/time in UTC
    DateTime(DateTime<Utc>),

    /// Date only
    Date(NaiveDate),

    /// Enum variant name
    Enum(&'static str),

    /// Sequential container contents, in generation order
    Array(Vec<MockValue>),

    /// Map entries, in insertion order, keys unique
    Map(Vec<(MockValue, MockValue)>),

    /// Pair of values
    Tuple(Box<MockValue>, Box<MockValue>),

    /// Structured object
    Object(MockObject),
}

impl MockValue {
    /// Build a tuple value.
    pub fn tuple(first: impl Into<MockValue>, second: impl Into<MockValue>) -> Self {
        Self::Tuple(Box::new(first.into()), Box::new(second.into()))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Runtime kind name, used in logs and conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Decimal(_) => "decimal",
            Self::Char(_) => "char",
            Self::String(_) => "string",
            Self::Uuid(_) => "uuid",
            Self::DateTime(_) => "date_time",
            Self::Date(_) => "date",
            Self::Enum(_) => "enum",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Tuple(..) => "tuple",
            Self::Object(_) => "object",
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Enum(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get this value as an i64, widening smaller integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int16(i) => Some(i64::from(*i)),
            Self::Int32(i) => Some(i64::from(*i)),
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float32(f) => Some(f64::from(*f)),
            Self::Float64(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as array items.
    pub fn as_array(&self) -> Option<&[MockValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as map entries.
    pub fn as_map(&self) -> Option<&[(MockValue, MockValue)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Try to get this value as an object.
    pub fn as_object(&self) -> Option<&MockObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Number of items, entries or fields for composite values.
    pub fn len(&self) -> usize {
        match self {
            Self::Array(items) => items.len(),
            Self::Map(entries) => entries.len(),
            Self::Tuple(..) => 2,
            Self::Object(object) => object.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a map entry. An equal key already present has its value
    /// replaced (last write wins).
    pub fn insert_entry(entries: &mut Vec<(MockValue, MockValue)>, key: MockValue, value: MockValue) {
        match entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    /// Rendering used for map keys in serialized output.
    fn key_string(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for MockValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int16(i) => write!(f, "{i}"),
            Self::Int32(i) => write!(f, "{i}"),
            Self::Int64(i) => write!(f, "{i}"),
            Self::Float32(x) => write!(f, "{x}"),
            Self::Float64(x) => write!(f, "{x}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Date(d) => write!(f, "{d}"),
            Self::Enum(v) => write!(f, "{v}"),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Self::Tuple(a, b) => write!(f, "({a}, {b})"),
            Self::Object(object) => write!(f, "{object}"),
        }
    }
}

impl Serialize for MockValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int16(i) => serializer.serialize_i16(*i),
            Self::Int32(i) => serializer.serialize_i32(*i),
            Self::Int64(i) => serializer.serialize_i64(*i),
            Self::Float32(x) => serializer.serialize_f32(*x),
            Self::Float64(x) => serializer.serialize_f64(*x),
            Self::Decimal(d) => serializer.collect_str(d),
            Self::Char(c) => serializer.serialize_char(*c),
            Self::String(s) => serializer.serialize_str(s),
            Self::Uuid(u) => serializer.collect_str(u),
            Self::DateTime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Self::Date(d) => serializer.collect_str(d),
            Self::Enum(v) => serializer.serialize_str(v),
            Self::Array(items) => serializer.collect_seq(items),
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(&k.key_string(), v)?;
                }
                map.end()
            }
            Self::Tuple(a, b) => {
                let mut tuple = serializer.serialize_tuple(2)?;
                tuple.serialize_element(a)?;
                tuple.serialize_element(b)?;
                tuple.end()
            }
            Self::Object(object) => object.serialize(serializer),
        }
    }
}

/// Field values of one synthesized structured instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MockObject {
    type_name: &'static str,
    fields: IndexMap<String, MockValue>,
}

impl MockObject {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: IndexMap::new(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Set a field value, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: MockValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&MockValue> {
        self.fields.get(name)
    }

    /// Remove and return a field value, keeping the order of the rest.
    pub fn take(&mut self, name: &str) -> Option<MockValue> {
        self.fields.shift_remove(name)
    }

    pub fn fields(&self) -> &IndexMap<String, MockValue> {
        &self.fields
    }

    pub fn into_fields(self) -> IndexMap<String, MockValue> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for MockObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ", self.type_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, " }}")
    }
}

impl Serialize for MockObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// Conversions used by rule closures: any of these may be returned from a
// generator and is turned into a `MockValue`.

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for MockValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool => Bool,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    Decimal => Decimal,
    char => Char,
    String => String,
    Uuid => Uuid,
    DateTime<Utc> => DateTime,
    NaiveDate => Date,
    MockObject => Object,
);

impl From<&str> for MockValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl<T: Into<MockValue>> From<Option<T>> for MockValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<MockValue>> From<Vec<T>> for MockValue {
    fn from(value: Vec<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<MockValue>> From<VecDeque<T>> for MockValue {
    fn from(value: VecDeque<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<MockValue>> From<HashSet<T>> for MockValue {
    fn from(value: HashSet<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<MockValue>, B: Into<MockValue>> From<(A, B)> for MockValue {
    fn from((a, b): (A, B)) -> Self {
        Self::tuple(a, b)
    }
}

impl<K: Into<MockValue>, V: Into<MockValue>> From<HashMap<K, V>> for MockValue {
    fn from(value: HashMap<K, V>) -> Self {
        Self::Map(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<MockValue>, V: Into<MockValue>> From<BTreeMap<K, V>> for MockValue {
    fn from(value: BTreeMap<K, V>) -> Self {
        Self::Map(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<serde_json::Value> for MockValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i32::try_from(i).map_or(Self::Int64(i), Self::Int32)
                } else {
                    Self::Float64(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => Self::Array(items.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (Self::String(k), v.into()))
                    .collect(),
            ),
        }
    }
}
