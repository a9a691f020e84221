//! Mock factory: the creation surface used by endpoint handlers, message
//! dispatchers and documentation tooling.

use crate::config::MockConfig;
use crate::error::{ConfigError, MockError};
use crate::registry::RuleRegistry;
use crate::synthesizer::ObjectSynthesizer;
use indexmap::IndexMap;
use mock_core::{MockObject, MockValue, Mockable, TypeHandle};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::info;

/// Creates mock instances from a shared [`RuleRegistry`].
///
/// Each call draws its own RNG from a seeded master generator, so calls can
/// run concurrently and a fixed `seed` reproduces the same call sequence.
pub struct MockFactory {
    registry: Arc<RuleRegistry>,
    config: MockConfig,
    rng: Mutex<StdRng>,
}

impl MockFactory {
    /// Create a factory with the default configuration.
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self::build(registry, MockConfig::default())
    }

    /// Create a factory from a configuration, installing its declarative
    /// rules into `registry`.
    pub fn with_config(registry: Arc<RuleRegistry>, config: MockConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        config.apply_to(&registry)?;
        Ok(Self::build(registry, config))
    }

    fn build(registry: Arc<RuleRegistry>, config: MockConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self {
            registry,
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    /// Nesting budget used when none is given.
    pub fn nested_count(&self) -> i32 {
        self.config.nested_count
    }

    /// Create a `T` with the default nesting budget.
    pub fn create_mock_object<T: Mockable>(&self) -> Result<T, MockError> {
        self.create_mock_object_with_depth(self.nested_count())
    }

    pub fn create_mock_object_with_depth<T: Mockable>(&self, nested_count: i32) -> Result<T, MockError> {
        let object = self.synthesize(&T::handle(), nested_count);
        let value = T::from_mock_object(object).map_err(|source| MockError::Construction {
            type_name: T::TYPE_NAME,
            source,
        })?;
        info!("Created mock {} (depth {})", T::TYPE_NAME, nested_count);
        Ok(value)
    }

    /// Create `count` independent instances of `T`, in order.
    pub fn create_mock_objects<T: Mockable>(&self, count: usize) -> Result<Vec<T>, MockError> {
        self.create_mock_objects_with_depth(count, self.nested_count())
    }

    pub fn create_mock_objects_with_depth<T: Mockable>(
        &self,
        count: usize,
        nested_count: i32,
    ) -> Result<Vec<T>, MockError> {
        (0..count)
            .map(|_| self.create_mock_object_with_depth(nested_count))
            .collect()
    }

    /// Create an instance of a type known only at runtime.
    pub fn create_mock_by_runtime_type(
        &self,
        handle: &TypeHandle,
        nested_count: Option<i32>,
    ) -> Result<Box<dyn Any + Send>, MockError> {
        let depth = nested_count.unwrap_or(self.config.nested_count);
        let object = self.synthesize(handle, depth);
        let value = handle
            .construct(object)
            .map_err(|source| MockError::Construction {
                type_name: handle.name(),
                source,
            })?;
        info!("Created mock {} (depth {})", handle.name(), depth);
        Ok(value)
    }

    /// Create an instance of a registered type by name.
    pub fn create_mock_by_type_name(
        &self,
        name: &str,
        nested_count: Option<i32>,
    ) -> Result<Box<dyn Any + Send>, MockError> {
        let handle = self.lookup(name)?;
        self.create_mock_by_runtime_type(&handle, nested_count)
    }

    /// Create a registered type by name, checking it is `T`.
    pub fn create_mock_by_type_name_as<T: Mockable>(
        &self,
        name: &str,
        nested_count: Option<i32>,
    ) -> Result<T, MockError> {
        let handle = self.lookup(name)?;
        if handle.type_id() != TypeId::of::<T>() {
            return Err(MockError::InvalidType {
                requested: name.to_string(),
                registered: handle.name(),
            });
        }
        self.create_mock_object_with_depth(nested_count.unwrap_or(self.config.nested_count))
    }

    /// Synthesized field values of a registered type, without building the
    /// Rust instance. Used by the CLI to print any registered type.
    pub fn create_mock_value_by_name(
        &self,
        name: &str,
        nested_count: Option<i32>,
    ) -> Result<MockValue, MockError> {
        let handle = self.lookup(name)?;
        let depth = nested_count.unwrap_or(self.config.nested_count);
        Ok(MockValue::Object(self.synthesize(&handle, depth)))
    }

    /// Field-by-field view of `T`, in declaration order.
    ///
    /// Uses `T`'s effective rules. A field that cannot be synthesized maps
    /// to `Null`.
    pub fn get_property_value_map<T: Mockable>(&self, nested_count: Option<i32>) -> IndexMap<String, MockValue> {
        self.property_value_map_for(&T::handle(), nested_count)
    }

    pub fn property_value_map_for(
        &self,
        handle: &TypeHandle,
        nested_count: Option<i32>,
    ) -> IndexMap<String, MockValue> {
        let depth = nested_count.unwrap_or(self.config.nested_count);
        self.synthesize(handle, depth).into_fields()
    }

    /// Property value map of a registered type by name.
    pub fn property_value_map_by_name(
        &self,
        name: &str,
        nested_count: Option<i32>,
    ) -> Result<IndexMap<String, MockValue>, MockError> {
        let handle = self.lookup(name)?;
        Ok(self.property_value_map_for(&handle, nested_count))
    }

    fn lookup(&self, name: &str) -> Result<TypeHandle, MockError> {
        self.registry
            .type_handle(name)
            .ok_or_else(|| MockError::UnknownType(name.to_string()))
    }

    fn synthesize(&self, handle: &TypeHandle, nested_count: i32) -> MockObject {
        let mut rng = self.call_rng();
        ObjectSynthesizer::new(&self.registry, &self.config).synthesize_object(handle, nested_count, &mut rng)
    }

    /// Fresh RNG for one call. The master lock is held only while seeding.
    fn call_rng(&self) -> StdRng {
        let seed: u64 = self.rng.lock().random();
        StdRng::seed_from_u64(seed)
    }
}
