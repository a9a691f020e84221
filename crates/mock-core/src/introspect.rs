//! Type introspection seam.
//!
//! Rust has no runtime reflection, so every type the engine can synthesize
//! describes itself through two traits:
//!
//! - [`MockField`]: any type that can appear as a field. It reports its
//!   [`TypeShape`] and converts a synthesized [`MockValue`] back into itself.
//! - [`Mockable`]: structured types. They list their fields in an
//!   [`ObjectDescriptor`] and assemble themselves from a [`MockObject`].
//!
//! The [`mockable!`](crate::mockable) macro implements both for structs and
//! fieldless enums, so the rest of the engine never inspects concrete types.

use crate::types::{ContainerShape, ObjectDescriptor, ScalarKind, TypeHandle, TypeShape};
use crate::values::{ConversionError, MockObject, MockValue};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use uuid::Uuid;

/// A type that can be stored in a field of a [`Mockable`] type.
pub trait MockField: Sized + Send + 'static {
    /// Structural classification of this type.
    fn shape() -> TypeShape;

    /// Convert a synthesized value into this type.
    fn from_mock(value: MockValue) -> Result<Self, ConversionError>;
}

/// A structured type whose instances the engine can synthesize.
pub trait Mockable: Sized + Send + 'static {
    /// Type name, used for runtime lookup and object type checks.
    const TYPE_NAME: &'static str;

    /// Derive the field layout. Called on every synthesis, never cached.
    fn describe() -> ObjectDescriptor;

    /// Assemble an instance from synthesized field values.
    ///
    /// Fields missing from `object`, or whose values cannot be converted,
    /// keep their `Default` value.
    fn from_mock_object(object: MockObject) -> Result<Self, ConversionError>;

    /// Runtime handle for this type.
    fn handle() -> TypeHandle {
        TypeHandle::of::<Self>()
    }
}

/// Remove `name` from `object` and convert it, falling back to the default.
///
/// A conversion failure is logged and never propagated: one bad field does
/// not abort construction of the whole object.
pub fn take_field<T: MockField + Default>(object: &mut MockObject, name: &str) -> T {
    match object.take(name) {
        None => T::default(),
        Some(MockValue::Null) => T::from_mock(MockValue::Null).unwrap_or_default(),
        Some(value) => T::from_mock(value).unwrap_or_else(|e| {
            tracing::warn!(
                "Field '{}.{}' keeps its default: {}",
                object.type_name(),
                name,
                e
            );
            T::default()
        }),
    }
}

/// Check that `object` was synthesized for type `T`.
pub fn expect_type<T: Mockable>(object: &MockObject) -> Result<(), ConversionError> {
    if object.type_name() == T::TYPE_NAME {
        Ok(())
    } else {
        Err(ConversionError::Invalid {
            type_name: T::TYPE_NAME,
            reason: format!("object was synthesized for {}", object.type_name()),
        })
    }
}

/// LIFO collection. Items pushed in generation order, popped in reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Most recently pushed item.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate from the bottom of the stack to the top.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

macro_rules! impl_scalar_field {
    ($ty:ty, $kind:ident, |$v:ident| $convert:expr) => {
        impl MockField for $ty {
            fn shape() -> TypeShape {
                TypeShape::Scalar(ScalarKind::$kind)
            }

            fn from_mock(value: MockValue) -> Result<Self, ConversionError> {
                let converted = {
                    let $v = &value;
                    $convert
                };
                converted.ok_or_else(|| ConversionError::mismatch(ScalarKind::$kind.name(), &value))
            }
        }
    };
}

impl_scalar_field!(bool, Bool, |v| match v {
    MockValue::Bool(b) => Some(*b),
    _ => None,
});
impl_scalar_field!(i16, Int16, |v| match v {
    MockValue::Int16(i) => Some(*i),
    _ => None,
});
impl_scalar_field!(i32, Int32, |v| match v {
    MockValue::Int16(i) => Some(i32::from(*i)),
    MockValue::Int32(i) => Some(*i),
    _ => None,
});
impl_scalar_field!(i64, Int64, |v| v.as_i64());
impl_scalar_field!(f32, Float32, |v| match v {
    MockValue::Float32(x) => Some(*x),
    _ => None,
});
impl_scalar_field!(f64, Float64, |v| v.as_f64());
impl_scalar_field!(Decimal, Decimal, |v| match v {
    MockValue::Decimal(d) => Some(*d),
    _ => None,
});
impl_scalar_field!(char, Char, |v| match v {
    MockValue::Char(c) => Some(*c),
    _ => None,
});
impl_scalar_field!(Uuid, Uuid, |v| match v {
    MockValue::Uuid(u) => Some(*u),
    _ => None,
});
impl_scalar_field!(DateTime<Utc>, DateTime, |v| match v {
    MockValue::DateTime(dt) => Some(*dt),
    _ => None,
});
impl_scalar_field!(NaiveDate, Date, |v| match v {
    MockValue::Date(d) => Some(*d),
    _ => None,
});

impl MockField for String {
    fn shape() -> TypeShape {
        TypeShape::Scalar(ScalarKind::String)
    }

    fn from_mock(value: MockValue) -> Result<Self, ConversionError> {
        match value {
            MockValue::String(s) => Ok(s),
            other => Err(ConversionError::mismatch("string", &other)),
        }
    }
}

impl<T: MockField> MockField for Option<T> {
    fn shape() -> TypeShape {
        TypeShape::Optional(Box::new(T::shape()))
    }

    fn from_mock(value: MockValue) -> Result<Self, ConversionError> {
        match value {
            MockValue::Null => Ok(None),
            other => T::from_mock(other).map(Some),
        }
    }
}

impl<T: MockField> MockField for Box<T> {
    fn shape() -> TypeShape {
        T::shape()
    }

    fn from_mock(value: MockValue) -> Result<Self, ConversionError> {
        T::from_mock(value).map(Box::new)
    }
}

/// Convert every item of an `Array` value.
fn array_items<T: MockField>(
    value: MockValue,
    expected: &'static str,
) -> Result<impl Iterator<Item = Result<T, ConversionError>>, ConversionError> {
    match value {
        MockValue::Array(items) => Ok(items.into_iter().map(T::from_mock)),
        other => Err(ConversionError::mismatch(expected, &other)),
    }
}

macro_rules! impl_sequential_field {
    ($ty:ty, $variant:ident, [$($bound:tt)*]) => {
        impl<T: MockField $($bound)*> MockField for $ty {
            fn shape() -> TypeShape {
                TypeShape::Container(ContainerShape::$variant(Box::new(T::shape())))
            }

            fn from_mock(value: MockValue) -> Result<Self, ConversionError> {
                array_items::<T>(value, stringify!($variant))?.collect()
            }
        }
    };
}

impl_sequential_field!(Vec<T>, Sequence, []);
impl_sequential_field!(VecDeque<T>, Queue, []);
impl_sequential_field!(Stack<T>, Stack, []);
impl_sequential_field!(HashSet<T>, Set, [+ Eq + Hash]);
impl_sequential_field!(BTreeSet<T>, Set, [+ Ord]);

impl<T: MockField> MockField for Box<[T]> {
    fn shape() -> TypeShape {
        TypeShape::Container(ContainerShape::Array(Box::new(T::shape())))
    }

    fn from_mock(value: MockValue) -> Result<Self, ConversionError> {
        array_items::<T>(value, "Array")?
            .collect::<Result<Vec<_>, _>>()
            .map(Vec::into_boxed_slice)
    }
}

fn map_entries<K: MockField, V: MockField>(
    value: MockValue,
) -> Result<impl Iterator<Item = Result<(K, V), ConversionError>>, ConversionError> {
    match value {
        MockValue::Map(entries) => Ok(entries
            .into_iter()
            .map(|(k, v)| Ok((K::from_mock(k)?, V::from_mock(v)?)))),
        other => Err(ConversionError::mismatch("map", &other)),
    }
}

fn map_shape<K: MockField, V: MockField>() -> TypeShape {
    TypeShape::Container(ContainerShape::Map {
        key: Box::new(K::shape()),
        value: Box::new(V::shape()),
    })
}

impl<K: MockField + Eq + Hash, V: MockField> MockField for HashMap<K, V> {
    fn shape() -> TypeShape {
        map_shape::<K, V>()
    }

    fn from_mock(value: MockValue) -> Result<Self, ConversionError> {
        map_entries(value)?.collect()
    }
}

impl<K: MockField + Ord, V: MockField> MockField for BTreeMap<K, V> {
    fn shape() -> TypeShape {
        map_shape::<K, V>()
    }

    fn from_mock(value: MockValue) -> Result<Self, ConversionError> {
        map_entries(value)?.collect()
    }
}

impl<A: MockField, B: MockField> MockField for (A, B) {
    fn shape() -> TypeShape {
        TypeShape::Container(ContainerShape::Tuple2(
            Box::new(A::shape()),
            Box::new(B::shape()),
        ))
    }

    fn from_mock(value: MockValue) -> Result<Self, ConversionError> {
        match value {
            MockValue::Tuple(a, b) => Ok((A::from_mock(*a)?, B::from_mock(*b)?)),
            other => Err(ConversionError::mismatch("tuple", &other)),
        }
    }
}

/// Free-form JSON cannot be classified; the synthesizer leaves it null.
impl MockField for serde_json::Value {
    fn shape() -> TypeShape {
        TypeShape::Opaque("serde_json::Value")
    }

    fn from_mock(value: MockValue) -> Result<Self, ConversionError> {
        serde_json::to_value(&value).map_err(|e| ConversionError::Invalid {
            type_name: "serde_json::Value",
            reason: e.to_string(),
        })
    }
}

/// Declare a struct or fieldless enum and implement the introspection
/// traits for it.
///
/// Every field type must implement [`MockField`] and `Default`.
///
/// ```ignore
/// mockable! {
///     #[derive(Debug, Clone, Default)]
///     pub struct Contact {
///         pub name: String,
///         pub email: String,
///     }
/// }
///
/// mockable! {
///     #[derive(Debug, Clone, Copy, Default)]
///     pub enum RoomType { #[default] Single, Double, Suite }
/// }
/// ```
///
/// Prefix a struct with `envelope` to mark it as a response envelope. It must
/// then declare `pagination: Option<PaginationMetadata>` and
/// `links: Option<Links>` fields, and gets a
/// [`ResponseEnvelope`](crate::envelope::ResponseEnvelope) implementation.
#[macro_export]
macro_rules! mockable {
    (@object $name:ident, $envelope:expr, [$($field:ident : $ty:ty),*]) => {
        impl $crate::introspect::Mockable for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn describe() -> $crate::types::ObjectDescriptor {
                let descriptor = $crate::types::ObjectDescriptor::new(stringify!($name))
                    $(.with_field($crate::types::FieldDescriptor::new(
                        stringify!($field),
                        <$ty as $crate::introspect::MockField>::shape(),
                    )))*;
                if $envelope {
                    descriptor.as_response_envelope()
                } else {
                    descriptor
                }
            }

            #[allow(unused_mut, unused_variables)]
            fn from_mock_object(
                mut object: $crate::values::MockObject,
            ) -> ::std::result::Result<Self, $crate::values::ConversionError> {
                $crate::introspect::expect_type::<Self>(&object)?;
                Ok(Self {
                    $($field: $crate::introspect::take_field(&mut object, stringify!($field)),)*
                })
            }
        }

        impl $crate::introspect::MockField for $name {
            fn shape() -> $crate::types::TypeShape {
                $crate::types::TypeShape::Object($crate::types::TypeHandle::of::<Self>())
            }

            fn from_mock(
                value: $crate::values::MockValue,
            ) -> ::std::result::Result<Self, $crate::values::ConversionError> {
                match value {
                    $crate::values::MockValue::Object(object) => {
                        <Self as $crate::introspect::Mockable>::from_mock_object(object)
                    }
                    other => Err($crate::values::ConversionError::mismatch(stringify!($name), &other)),
                }
            }
        }
    };

    (
        envelope
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $($(#[$fmeta])* $fvis $field: $ty,)*
        }

        $crate::mockable!(@object $name, true, [$($field: $ty),*]);

        impl $crate::envelope::ResponseEnvelope for $name {
            fn pagination_mut(&mut self) -> &mut Option<$crate::envelope::PaginationMetadata> {
                &mut self.pagination
            }

            fn links_mut(&mut self) -> &mut Option<$crate::envelope::Links> {
                &mut self.links
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $($(#[$fmeta])* $fvis $field: $ty,)*
        }

        $crate::mockable!(@object $name, false, [$($field: $ty),*]);
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(#[$vmeta])* $variant,)*
        }

        impl $crate::introspect::MockField for $name {
            fn shape() -> $crate::types::TypeShape {
                $crate::types::TypeShape::Enum($crate::types::EnumDescriptor::new(
                    stringify!($name),
                    vec![$(stringify!($variant)),*],
                ))
            }

            fn from_mock(
                value: $crate::values::MockValue,
            ) -> ::std::result::Result<Self, $crate::values::ConversionError> {
                let variant = match &value {
                    $crate::values::MockValue::Enum(v) => *v,
                    $crate::values::MockValue::String(s) => s.as_str(),
                    other => {
                        return Err($crate::values::ConversionError::mismatch(
                            stringify!($name),
                            other,
                        ))
                    }
                };
                $(
                    if variant == stringify!($variant) {
                        return Ok(Self::$variant);
                    }
                )*
                Err($crate::values::ConversionError::UnknownVariant {
                    type_name: stringify!($name),
                    variant: variant.to_string(),
                })
            }
        }

        impl From<$name> for $crate::values::MockValue {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => $crate::values::MockValue::Enum(stringify!($variant)),)*
                }
            }
        }
    };
}
