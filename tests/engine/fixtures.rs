//! Shared test types and factory helpers.

use api_mock::{mockable, MockConfig, MockFactory, RuleRegistry};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::Arc;

pub const SEED: u64 = 42;

mockable! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Contact {
        pub name: String,
        pub email: String,
    }
}

mockable! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Node {
        pub label: String,
        pub child: Option<Box<Node>>,
    }
}

mockable! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Tagged {
        pub tags: HashMap<String, i32>,
    }
}

mockable! {
    #[derive(Debug, Default)]
    pub struct Collections {
        pub list: Vec<i32>,
        pub array: Box<[i64]>,
        pub set: HashSet<String>,
        pub queue: VecDeque<bool>,
        pub stack: api_mock::mock_core::Stack<String>,
        pub map: BTreeMap<String, f64>,
        pub pair: (i32, String),
    }
}

/// Factory with a fixed seed over `registry`.
pub fn seeded_factory(registry: Arc<RuleRegistry>) -> MockFactory {
    let config = MockConfig {
        seed: Some(SEED),
        ..MockConfig::default()
    };
    MockFactory::with_config(registry, config).unwrap()
}

/// Seeded factory over an empty registry.
pub fn bare_factory() -> MockFactory {
    seeded_factory(Arc::new(RuleRegistry::new()))
}
