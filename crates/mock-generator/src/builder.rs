//! Fluent per-type rule builder.
//!
//! ```rust,ignore
//! registry.configure::<Hotel>(|b| {
//!     b.for_property("name", |f| f.company_name())
//!         .for_nested_object_list::<Room>("rooms", 3)
//!         .for_tuple("coordinates", |f| f.float_range(-90.0, 90.0), |f| f.float_range(-180.0, 180.0))
//!         .for_dictionary("metadata", 2, |f| f.uuid(), DictionaryValues::generated(|f| f.word()))
//! });
//! ```

use crate::faker::Faker;
use crate::rules::{into_generator, Generator, Rule, RuleSet};
use mock_core::{MockValue, Mockable, TypeHandle};
use std::marker::PhantomData;

/// Nested list size used by [`MockConfigurationBuilder::for_nested_objects`].
pub const DEFAULT_LIST_COUNT: usize = 5;

/// Value source for [`MockConfigurationBuilder::for_dictionary`].
#[derive(Clone)]
pub enum DictionaryValues {
    /// Values from a generator
    Generated(Generator),
    /// Values are nested objects of a structured type
    Object(TypeHandle),
}

impl DictionaryValues {
    pub fn generated<G, V>(generator: G) -> Self
    where
        G: Fn(&mut Faker<'_>) -> V + Send + Sync + 'static,
        V: Into<MockValue>,
    {
        Self::Generated(into_generator(generator))
    }

    pub fn object<T: Mockable>() -> Self {
        Self::Object(T::handle())
    }

    fn generate(&self, faker: &mut Faker<'_>) -> MockValue {
        match self {
            Self::Generated(generator) => generator(faker),
            Self::Object(handle) => faker.element_object(handle),
        }
    }
}

/// Chainable registration surface for the rules of one type `T`.
pub struct MockConfigurationBuilder<T> {
    rules: RuleSet,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Mockable> MockConfigurationBuilder<T> {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::new(),
            _marker: PhantomData,
        }
    }

    fn with_rule(mut self, property: &str, generator: Generator) -> Self {
        let rule = Rule::new(property, generator).owned_by(T::TYPE_NAME);
        self.rules.insert(property.to_string(), rule);
        self
    }

    /// Direct override.
    pub fn for_property<G, V>(self, property: &str, generator: G) -> Self
    where
        G: Fn(&mut Faker<'_>) -> V + Send + Sync + 'static,
        V: Into<MockValue>,
    {
        self.with_rule(property, into_generator(generator))
    }

    /// Override with a declarative or shared generator.
    pub fn for_property_generator(self, property: &str, generator: Generator) -> Self {
        self.with_rule(property, generator)
    }

    /// A synthesized `N`.
    pub fn for_nested_object<N: Mockable>(self, property: &str) -> Self {
        self.for_property(property, |f: &mut Faker<'_>| f.mock_object::<N>())
    }

    /// `count` synthesized `N` instances.
    pub fn for_nested_object_list<N: Mockable>(self, property: &str, count: usize) -> Self {
        self.for_property(property, move |f: &mut Faker<'_>| f.mock_objects::<N>(count))
    }

    /// [`DEFAULT_LIST_COUNT`] synthesized `N` instances.
    pub fn for_nested_objects<N: Mockable>(self, property: &str) -> Self {
        self.for_nested_object_list::<N>(property, DEFAULT_LIST_COUNT)
    }

    /// A pair built from two independent generators.
    pub fn for_tuple<G1, V1, G2, V2>(self, property: &str, first: G1, second: G2) -> Self
    where
        G1: Fn(&mut Faker<'_>) -> V1 + Send + Sync + 'static,
        V1: Into<MockValue>,
        G2: Fn(&mut Faker<'_>) -> V2 + Send + Sync + 'static,
        V2: Into<MockValue>,
    {
        self.for_property(property, move |f: &mut Faker<'_>| {
            let a = first(f);
            let b = second(f);
            MockValue::tuple(a, b)
        })
    }

    /// A map with up to `count` entries from independent key and value
    /// sources.
    ///
    /// Colliding keys collapse (last write wins), and entries with a null key
    /// or value are skipped, so the map may hold fewer than `count` entries.
    /// Object values sit one budget level down. The map is empty once the
    /// budget is exhausted.
    pub fn for_dictionary<GK, K>(
        self,
        property: &str,
        count: usize,
        key: GK,
        values: DictionaryValues,
    ) -> Self
    where
        GK: Fn(&mut Faker<'_>) -> K + Send + Sync + 'static,
        K: Into<MockValue>,
    {
        self.for_property(property, move |f: &mut Faker<'_>| {
            if f.budget() <= 0 {
                return MockValue::Map(Vec::new());
            }
            let mut entries = Vec::with_capacity(count);
            for _ in 0..count {
                let k: MockValue = key(f).into();
                let v = values.generate(f);
                if k.is_null() || v.is_null() {
                    continue;
                }
                MockValue::insert_entry(&mut entries, k, v);
            }
            MockValue::Map(entries)
        })
    }

    /// The finished property to rule mapping.
    pub fn build(self) -> RuleSet {
        self.rules
    }
}

impl<T: Mockable> Default for MockConfigurationBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
