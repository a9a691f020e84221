//! Random source handed to rule generators.

use crate::config::MockConfig;
use crate::generators::{text, timestamp, uuid::random_uuid};
use crate::synthesizer::ObjectSynthesizer;
use chrono::{DateTime, Utc};
use mock_core::{MockValue, Mockable, TypeHandle, TypeShape};
use rand::rngs::StdRng;
use rand::Rng;
use uuid::Uuid;

/// Per-call random source and synthesis context.
///
/// A `Faker` is created for every rule invocation. It carries the call's
/// RNG and the nesting budget of the field being resolved, so nested
/// helpers such as [`Faker::mock_object`] respect the same recursion bound
/// as structural synthesis.
pub struct Faker<'a> {
    rng: &'a mut StdRng,
    synthesizer: &'a ObjectSynthesizer<'a>,
    budget: i32,
}

impl<'a> Faker<'a> {
    pub(crate) fn new(
        rng: &'a mut StdRng,
        synthesizer: &'a ObjectSynthesizer<'a>,
        budget: i32,
    ) -> Self {
        Self {
            rng,
            synthesizer,
            budget,
        }
    }

    /// The underlying RNG, for generators not covered by the helpers.
    pub fn rng(&mut self) -> &mut StdRng {
        self.rng
    }

    /// Nesting budget of the field being resolved.
    pub fn budget(&self) -> i32 {
        self.budget
    }

    pub fn config(&self) -> &MockConfig {
        self.synthesizer.config()
    }

    pub fn word(&mut self) -> String {
        text::word(self.rng)
    }

    pub fn sentence(&mut self) -> String {
        text::sentence(self.rng)
    }

    pub fn full_name(&mut self) -> String {
        text::full_name(self.rng)
    }

    pub fn first_name(&mut self) -> String {
        text::first_name(self.rng)
    }

    pub fn last_name(&mut self) -> String {
        text::last_name(self.rng)
    }

    pub fn email(&mut self) -> String {
        text::email(self.rng)
    }

    pub fn phone(&mut self) -> String {
        text::phone(self.rng)
    }

    /// Street address.
    pub fn address(&mut self) -> String {
        text::street_address(self.rng)
    }

    pub fn city(&mut self) -> String {
        text::city(self.rng)
    }

    pub fn region(&mut self) -> String {
        text::region(self.rng)
    }

    pub fn postal_code(&mut self) -> String {
        text::postal_code(self.rng)
    }

    pub fn country(&mut self) -> String {
        text::country(self.rng)
    }

    pub fn company_name(&mut self) -> String {
        text::company_name(self.rng)
    }

    /// Integer in `[min, max]`; `min` when the range is empty.
    pub fn int_range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    pub fn long_range(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    pub fn float_range(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    pub fn boolean(&mut self) -> bool {
        self.rng.random()
    }

    /// `true` with probability `true_weight`.
    pub fn weighted_bool(&mut self, true_weight: f64) -> bool {
        self.rng.random::<f64>() < true_weight
    }

    pub fn uuid(&mut self) -> Uuid {
        random_uuid(self.rng)
    }

    /// Instant within the configured date window, up to now.
    pub fn recent_timestamp(&mut self) -> DateTime<Utc> {
        let days = self.synthesizer.config().date_window_days;
        timestamp::recent_instant(self.rng, days)
    }

    /// Uniformly chosen item, `None` if `items` is empty.
    pub fn pick<T: Clone>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..items.len());
        Some(items[idx].clone())
    }

    /// Structural value for `shape` at the current budget.
    pub fn value_of(&mut self, shape: &TypeShape) -> MockValue {
        self.synthesizer.synthesize_value(shape, self.budget, self.rng)
    }

    /// A nested `T`, or `Null` once the budget is exhausted.
    pub fn mock_object<T: Mockable>(&mut self) -> MockValue {
        self.mock_object_of(&T::handle())
    }

    pub fn mock_object_of(&mut self, handle: &TypeHandle) -> MockValue {
        self.value_of(&TypeShape::Object(*handle))
    }

    /// `count` nested `T` instances, one budget level down.
    ///
    /// Always exactly `count` items, or empty once the budget is exhausted.
    pub fn mock_objects<T: Mockable>(&mut self, count: usize) -> MockValue {
        let handle = T::handle();
        if self.budget <= 0 {
            return MockValue::Array(Vec::new());
        }
        let items = (0..count)
            .map(|_| self.element_object(&handle))
            .collect();
        MockValue::Array(items)
    }

    /// A nested object one budget level down, as a container element.
    ///
    /// Built even when that level is the last one. Callers check the budget
    /// for the container itself.
    pub fn element_object(&mut self, handle: &TypeHandle) -> MockValue {
        self.synthesizer
            .synthesize_element(&TypeShape::Object(*handle), self.budget - 1, self.rng)
    }
}
