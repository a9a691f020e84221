//! Object synthesizer: the graph-traversal core.
//!
//! ```text
//! synthesize_object(T, budget)
//!        │
//!        ▼  for each writable field, with budget - 1
//! ┌──────────────────────────┐
//! │ effective_rules(T)[name] │── value fits ──▶ rule value
//! │                          │── fits element ─▶ rule per element
//! └────────────┬─────────────┘
//!              │ no rule / mismatch / panic
//!              ▼
//!     synthesize_value(shape, budget)
//!        scalar, enum ─▶ primitive
//!        container    ─▶ container (elements at budget - 1, objects always built)
//!        object field ─▶ synthesize_object, or null at budget <= 0
//! ```
//!
//! The budget is the only recursion bound. Self-referential types terminate
//! because every object or container level consumes one unit.

mod container;

use crate::config::MockConfig;
use crate::faker::Faker;
use crate::generators;
use crate::registry::RuleRegistry;
use crate::rules::{Rule, RuleSet};
use mock_core::{ContainerShape, FieldDescriptor, MockObject, MockValue, TypeHandle, TypeShape};
use rand::rngs::StdRng;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, error, warn};

/// Envelope attachments cleared after synthesis.
const ENVELOPE_ATTACHMENTS: [&str; 2] = ["pagination", "links"];

/// Synthesizes objects from their descriptors and the registry's rules.
///
/// Holds no per-call state; all randomness comes from the RNG passed to each
/// call.
#[derive(Clone, Copy)]
pub struct ObjectSynthesizer<'a> {
    registry: &'a RuleRegistry,
    config: &'a MockConfig,
}

impl<'a> ObjectSynthesizer<'a> {
    pub fn new(registry: &'a RuleRegistry, config: &'a MockConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &'a RuleRegistry {
        self.registry
    }

    pub fn config(&self) -> &'a MockConfig {
        self.config
    }

    /// Synthesize field values for one instance of the handle's type.
    ///
    /// The object itself is always produced; its fields resolve with
    /// `budget - 1`.
    pub fn synthesize_object(&self, handle: &TypeHandle, budget: i32, rng: &mut StdRng) -> MockObject {
        let descriptor = handle.descriptor();
        let rules = self.registry.effective_rules_for(handle);
        let mut object = MockObject::new(descriptor.type_name);

        for field in descriptor.writable_fields() {
            let value = self.resolve_field(descriptor.type_name, &rules, field, budget - 1, rng);
            object.insert(field.name, value);
        }

        if descriptor.response_envelope {
            for name in ENVELOPE_ATTACHMENTS {
                if descriptor.field(name).is_some() {
                    object.insert(name, MockValue::Null);
                }
            }
        }

        object
    }

    /// Synthesize `count` independent instances, in order.
    pub fn synthesize_objects(
        &self,
        handle: &TypeHandle,
        count: usize,
        budget: i32,
        rng: &mut StdRng,
    ) -> Vec<MockObject> {
        (0..count)
            .map(|_| self.synthesize_object(handle, budget, rng))
            .collect()
    }

    /// Resolve one field: matching rule first, structural synthesis otherwise.
    ///
    /// Never fails. A panicking structural synthesis leaves the field `Null`,
    /// which converts to the field type's default.
    pub fn resolve_field(
        &self,
        type_name: &str,
        rules: &RuleSet,
        field: &FieldDescriptor,
        budget: i32,
        rng: &mut StdRng,
    ) -> MockValue {
        if let Some(rule) = rules.get(field.name) {
            if let Some(value) = self.apply_rule(type_name, rule, field, budget, rng) {
                return value;
            }
        }

        match catch_unwind(AssertUnwindSafe(|| {
            self.synthesize_value(&field.shape, budget, rng)
        })) {
            Ok(value) => value,
            Err(payload) => {
                error!(
                    "Synthesis of '{}.{}' failed, keeping default: {}",
                    type_name,
                    field.name,
                    panic_message(payload.as_ref())
                );
                MockValue::Null
            }
        }
    }

    /// Structural value for a shape, ignoring rules at this level.
    pub fn synthesize_value(&self, shape: &TypeShape, budget: i32, rng: &mut StdRng) -> MockValue {
        match shape {
            TypeShape::Scalar(kind) => generators::synthesize_primitive(*kind, rng, self.config),
            TypeShape::Enum(descriptor) => generators::synthesize_enum(descriptor, rng),
            // Fallback always fills an optional unless the inner value is exhausted
            TypeShape::Optional(inner) => self.synthesize_value(inner, budget, rng),
            TypeShape::Container(container) => {
                container::synthesize_container(self, container, budget, rng)
            }
            TypeShape::Object(handle) => {
                if budget <= 0 {
                    MockValue::Null
                } else {
                    MockValue::Object(self.synthesize_object(handle, budget, rng))
                }
            }
            TypeShape::Opaque(name) => {
                warn!("Cannot synthesize opaque type {}, leaving it null", name);
                MockValue::Null
            }
        }
    }

    /// Container element, tuple slot or map value.
    ///
    /// Objects are always built here, since their own fields sit one more
    /// level down and bottom out there. Everything else is structural.
    pub fn synthesize_element(&self, shape: &TypeShape, budget: i32, rng: &mut StdRng) -> MockValue {
        match shape {
            TypeShape::Object(handle) => MockValue::Object(self.synthesize_object(handle, budget, rng)),
            TypeShape::Optional(inner) => self.synthesize_element(inner, budget, rng),
            other => self.synthesize_value(other, budget, rng),
        }
    }

    /// Run a rule and check its value against the field.
    ///
    /// `None` means the caller falls back to structural synthesis.
    fn apply_rule(
        &self,
        type_name: &str,
        rule: &Rule,
        field: &FieldDescriptor,
        budget: i32,
        rng: &mut StdRng,
    ) -> Option<MockValue> {
        let value = self.invoke(type_name, field.name, rule, budget, rng)?;

        if field.shape.accepts(&value) {
            debug!("Applied rule for '{}.{}'", type_name, field.name);
            return Some(value);
        }

        let element = field.shape.container().and_then(ContainerShape::element);
        if let Some(element) = element {
            if !value.is_null() && element.accepts(&value) {
                debug!("Applying rule for '{}.{}' per element", type_name, field.name);
                return Some(self.repeat_rule(type_name, rule, field, element, value, budget, rng));
            }
        }

        warn!(
            "Rule for '{}.{}' produced {} which does not fit {}; using structural synthesis",
            type_name,
            field.name,
            value.kind(),
            field.shape
        );
        None
    }

    /// Fill a container field by invoking an element-level rule repeatedly.
    #[allow(clippy::too_many_arguments)]
    fn repeat_rule(
        &self,
        type_name: &str,
        rule: &Rule,
        field: &FieldDescriptor,
        element: &TypeShape,
        first: MockValue,
        budget: i32,
        rng: &mut StdRng,
    ) -> MockValue {
        if budget <= 0 {
            return MockValue::Array(Vec::new());
        }

        let len = container::collection_len(self.config, rng);
        let unique = matches!(field.shape.container(), Some(ContainerShape::Set(_)));
        let mut items = vec![first];

        for _ in 1..len {
            let Some(value) = self.invoke(type_name, field.name, rule, budget, rng) else {
                continue;
            };
            if value.is_null() || !element.accepts(&value) || (unique && items.contains(&value)) {
                continue;
            }
            items.push(value);
        }

        MockValue::Array(items)
    }

    /// Invoke a rule generator, isolating panics.
    ///
    /// The process panic hook still runs before the unwind is caught, so the
    /// default hook prints the panic to stderr next to the `error!` event.
    /// Binaries that want only the log line install their own hook.
    fn invoke(
        &self,
        type_name: &str,
        property: &str,
        rule: &Rule,
        budget: i32,
        rng: &mut StdRng,
    ) -> Option<MockValue> {
        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut faker = Faker::new(rng, self, budget);
            rule.generate(&mut faker)
        }));

        match result {
            Ok(value) => Some(value),
            Err(payload) => {
                error!(
                    "Rule for '{}.{}' panicked: {}",
                    type_name,
                    property,
                    panic_message(payload.as_ref())
                );
                None
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_core::{mockable, Mockable, Stack};
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet, VecDeque};

    mockable! {
        #[derive(Debug, Default)]
        struct Node {
            label: String,
            child: Option<Box<Node>>,
        }
    }

    mockable! {
        #[derive(Debug, Default)]
        struct Bag {
            words: Vec<String>,
            numbers: HashSet<i32>,
            queue: VecDeque<i64>,
            stack: Stack<bool>,
            tags: HashMap<String, i32>,
            point: (f64, f64),
            slots: Box<[Level]>,
        }
    }

    mockable! {
        #[derive(Debug, Default, Clone, Copy, PartialEq)]
        enum Level {
            #[default]
            Low,
            High,
        }
    }

    fn synthesize(
        registry: &RuleRegistry,
        handle: &TypeHandle,
        budget: i32,
    ) -> MockObject {
        let config = MockConfig::default();
        let synthesizer = ObjectSynthesizer::new(registry, &config);
        let mut rng = StdRng::seed_from_u64(42);
        synthesizer.synthesize_object(handle, budget, &mut rng)
    }

    #[test]
    fn test_self_referential_type_terminates() {
        let registry = RuleRegistry::new();
        let object = synthesize(&registry, &Node::handle(), 2);

        let child = object.get("child").and_then(MockValue::as_object).unwrap();
        assert_eq!(child.get("child"), Some(&MockValue::Null));
    }

    #[test]
    fn test_zero_budget_still_builds_root() {
        let registry = RuleRegistry::new();
        let object = synthesize(&registry, &Node::handle(), 0);

        assert!(matches!(object.get("label"), Some(MockValue::String(_))));
        assert_eq!(object.get("child"), Some(&MockValue::Null));
    }

    #[test]
    fn test_container_sizes() {
        let registry = RuleRegistry::new();
        for seed_budget in [2, 5] {
            let object = synthesize(&registry, &Bag::handle(), seed_budget);
            for name in ["words", "numbers", "queue", "stack", "tags", "slots"] {
                let len = object.get(name).map(MockValue::len).unwrap();
                assert!((1..=5).contains(&len), "{name} has {len} items");
            }
            assert!(matches!(object.get("point"), Some(MockValue::Tuple(..))));
        }
    }

    #[test]
    fn test_containers_empty_when_exhausted() {
        let registry = RuleRegistry::new();
        let object = synthesize(&registry, &Bag::handle(), 1);

        for name in ["words", "numbers", "queue", "stack", "tags", "slots"] {
            assert!(object.get(name).unwrap().is_empty(), "{name} should be empty");
        }
        assert_eq!(object.get("point"), Some(&MockValue::Null));
    }

    #[test]
    fn test_rule_value_used() {
        let registry = RuleRegistry::new();
        registry.register_type_rule::<Node, _, _>("label", |_: &mut Faker<'_>| "fixed");

        let object = synthesize(&registry, &Node::handle(), 3);
        assert_eq!(object.get("label"), Some(&MockValue::from("fixed")));
    }

    #[test]
    fn test_mismatched_rule_falls_back() {
        let registry = RuleRegistry::new();
        registry.register_type_rule::<Node, _, _>("label", |_: &mut Faker<'_>| 42);

        let object = synthesize(&registry, &Node::handle(), 3);
        assert!(matches!(object.get("label"), Some(MockValue::String(s)) if !s.is_empty()));
    }

    #[test]
    fn test_panicking_rule_falls_back() {
        let registry = RuleRegistry::new();
        registry.register_type_rule::<Node, _, _>("label", |_: &mut Faker<'_>| -> MockValue {
            panic!("generator failure")
        });

        let object = synthesize(&registry, &Node::handle(), 3);
        assert!(matches!(object.get("label"), Some(MockValue::String(_))));
    }

    #[test]
    fn test_element_rule_reused_per_element() {
        let registry = RuleRegistry::new();
        registry.register_type_rule::<Bag, _, _>("words", |_: &mut Faker<'_>| "same");

        let object = synthesize(&registry, &Bag::handle(), 3);
        let words = object.get("words").and_then(MockValue::as_array).unwrap();
        assert!(!words.is_empty());
        assert!(words.iter().all(|w| *w == MockValue::from("same")));
    }

    #[test]
    fn test_opaque_shape_is_null() {
        let registry = RuleRegistry::new();
        let config = MockConfig::default();
        let synthesizer = ObjectSynthesizer::new(&registry, &config);
        let mut rng = StdRng::seed_from_u64(42);

        let value = synthesizer.synthesize_value(&TypeShape::Opaque("json"), 5, &mut rng);
        assert_eq!(value, MockValue::Null);
    }
}
