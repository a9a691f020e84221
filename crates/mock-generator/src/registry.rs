//! Rule registry: default rules, per-type rules and the type catalog.
//!
//! The effective rule set for a type is `defaults ∪ type_rules[T]`, with
//! per-type entries overriding same-named defaults. It is recomputed on
//! every lookup, so rules registered between calls take effect immediately.
//!
//! State sits behind a read-write lock. Lookups clone the rule handles out
//! and release the lock before any generator runs, so a generator that
//! synthesizes nested objects never re-enters a held lock.

use crate::builder::MockConfigurationBuilder;
use crate::faker::Faker;
use crate::rules::{into_generator, Rule, RuleSet};
use indexmap::IndexMap;
use mock_core::{MockValue, Mockable, TypeHandle};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
struct RegistryState {
    defaults: RuleSet,
    types: HashMap<TypeId, RuleSet>,
    catalog: IndexMap<&'static str, TypeHandle>,
}

/// Store of default and per-type rules.
#[derive(Default)]
pub struct RuleRegistry {
    state: RwLock<RegistryState>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the conventional default rules installed.
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | `name` | full person name |
    /// | `email` | email address |
    /// | `phone` | phone number |
    /// | `address` | street address |
    /// | `city` | city name |
    /// | `region` | state or province |
    /// | `postal_code` | postal code |
    /// | `country` | country name |
    pub fn with_default_rules() -> Self {
        let registry = Self::new();
        registry.register_default("name", |f: &mut Faker<'_>| f.full_name());
        registry.register_default("email", |f: &mut Faker<'_>| f.email());
        registry.register_default("phone", |f: &mut Faker<'_>| f.phone());
        registry.register_default("address", |f: &mut Faker<'_>| f.address());
        registry.register_default("city", |f: &mut Faker<'_>| f.city());
        registry.register_default("region", |f: &mut Faker<'_>| f.region());
        registry.register_default("postal_code", |f: &mut Faker<'_>| f.postal_code());
        registry.register_default("country", |f: &mut Faker<'_>| f.country());
        registry
    }

    /// Register a default rule shared by all types.
    pub fn register_default<G, V>(&self, property: impl Into<String>, generator: G)
    where
        G: Fn(&mut Faker<'_>) -> V + Send + Sync + 'static,
        V: Into<MockValue>,
    {
        self.add_default(Rule::new(property, into_generator(generator)));
    }

    /// Insert a prepared default rule, replacing any rule of the same name.
    pub fn add_default(&self, rule: Rule) {
        debug!("Registering default rule '{}'", rule.property());
        let mut state = self.state.write();
        state.defaults.insert(rule.property().to_string(), rule);
    }

    /// Register a rule for one property of `T`.
    pub fn register_type_rule<T, G, V>(&self, property: impl Into<String>, generator: G)
    where
        T: Mockable,
        G: Fn(&mut Faker<'_>) -> V + Send + Sync + 'static,
        V: Into<MockValue>,
    {
        self.add_type_rule(T::handle(), Rule::new(property, into_generator(generator)));
    }

    /// Insert a prepared rule into the handle's rule set.
    pub fn add_type_rule(&self, handle: TypeHandle, rule: Rule) {
        debug!(
            "Registering rule '{}' for type {}",
            rule.property(),
            handle.name()
        );
        let rule = rule.owned_by(handle.name());
        let mut state = self.state.write();
        state.catalog.insert(handle.name(), handle);
        state
            .types
            .entry(handle.type_id())
            .or_default()
            .insert(rule.property().to_string(), rule);
    }

    /// Build `T`'s rule set with the fluent builder, replacing any previous
    /// rules for `T`.
    pub fn configure<T: Mockable>(
        &self,
        build: impl FnOnce(MockConfigurationBuilder<T>) -> MockConfigurationBuilder<T>,
    ) {
        let rules = build(MockConfigurationBuilder::new()).build();
        self.register_configuration::<T>(rules);
    }

    /// Replace `T`'s rule set.
    pub fn register_configuration<T: Mockable>(&self, rules: RuleSet) {
        let handle = T::handle();
        debug!(
            "Registering configuration for type {} ({} rules)",
            handle.name(),
            rules.len()
        );
        let rules = rules
            .into_iter()
            .map(|(property, rule)| (property, rule.owned_by(handle.name())))
            .collect();
        let mut state = self.state.write();
        state.catalog.insert(handle.name(), handle);
        state.types.insert(handle.type_id(), rules);
    }

    /// Add `T` to the type catalog without registering rules.
    pub fn register_type<T: Mockable>(&self) {
        self.register_handle(T::handle());
    }

    pub fn register_handle(&self, handle: TypeHandle) {
        self.state.write().catalog.insert(handle.name(), handle);
    }

    /// Effective rules for `T`: defaults overlaid with `T`'s rules.
    pub fn effective_rules<T: Mockable>(&self) -> RuleSet {
        self.effective_rules_for(&T::handle())
    }

    pub fn effective_rules_for(&self, handle: &TypeHandle) -> RuleSet {
        let state = self.state.read();
        let mut rules = state.defaults.clone();
        if let Some(type_rules) = state.types.get(&handle.type_id()) {
            for (property, rule) in type_rules {
                rules.insert(property.clone(), rule.clone());
            }
        }
        rules
    }

    /// Snapshot of the default rules.
    pub fn default_rules(&self) -> RuleSet {
        self.state.read().defaults.clone()
    }

    /// Snapshot of `T`'s own rules, without defaults.
    pub fn type_rules<T: Mockable>(&self) -> RuleSet {
        self.state
            .read()
            .types
            .get(&TypeId::of::<T>())
            .cloned()
            .unwrap_or_default()
    }

    /// Look up a registered type by name.
    pub fn type_handle(&self, name: &str) -> Option<TypeHandle> {
        self.state.read().catalog.get(name).copied()
    }

    /// Registered types, in registration order.
    pub fn known_types(&self) -> Vec<TypeHandle> {
        self.state.read().catalog.values().copied().collect()
    }
}
