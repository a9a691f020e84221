//! Structural properties of synthesis without rules.

use crate::fixtures::{bare_factory, Collections, Contact, Node, Tagged};
use api_mock::mock_generator::MockFactory;
use api_mock::mockable;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use std::thread;

mockable! {
    #[derive(Debug, Default)]
    struct Roster {
        contacts: Vec<Contact>,
        waiting: VecDeque<Contact>,
        by_desk: BTreeMap<String, Contact>,
        pair: (Contact, Contact),
        words: Vec<String>,
        invited: Vec<Contact>,
    }
}

fn assert_sized(len: usize, field: &str) {
    assert!((1..=5).contains(&len), "{field} has {len} elements");
}

#[test]
fn test_contact_without_rules() {
    let contact: Contact = bare_factory().create_mock_object().unwrap();
    assert!(!contact.name.is_empty());
    assert!(!contact.email.is_empty());
}

#[test]
fn test_self_referential_budget_two() {
    let node: Node = bare_factory().create_mock_object_with_depth(2).unwrap();
    let child = node.child.as_ref().expect("child populated at budget 2");
    assert!(child.child.is_none());
}

#[test]
fn test_self_referential_terminates_for_any_budget() {
    let factory = bare_factory();
    for depth in 0..=25 {
        let node: Node = factory.create_mock_object_with_depth(depth).unwrap();
        let mut levels = 0;
        let mut current = node.child.as_deref();
        while let Some(next) = current {
            levels += 1;
            current = next.child.as_deref();
        }
        assert_eq!(levels, (depth - 1).max(0), "depth {depth}");
    }
}

#[test]
fn test_collection_sizing_with_budget() {
    let factory = bare_factory();
    for _ in 0..20 {
        let c: Collections = factory.create_mock_object_with_depth(2).unwrap();
        assert_sized(c.list.len(), "list");
        assert_sized(c.array.len(), "array");
        assert_sized(c.set.len(), "set");
        assert_sized(c.queue.len(), "queue");
        assert_sized(c.stack.len(), "stack");
        assert_sized(c.map.len(), "map");
        assert!(c.list.iter().all(|v| (0..=100).contains(v)));
        assert!(!c.pair.1.is_empty());
    }
}

#[test]
fn test_object_collections_filled_at_last_level() {
    let factory = bare_factory();
    for _ in 0..20 {
        // Fields resolve at budget 1, so elements sit on the last level
        let roster: Roster = factory.create_mock_object_with_depth(2).unwrap();
        assert_sized(roster.contacts.len(), "contacts");
        assert_sized(roster.waiting.len(), "waiting");
        assert_sized(roster.by_desk.len(), "by_desk");
        assert_sized(roster.words.len(), "words");
        assert!(roster.contacts.iter().all(|c| !c.name.is_empty()));
        assert!(roster.by_desk.values().all(|c| !c.email.is_empty()));
        assert!(!roster.pair.0.name.is_empty() && !roster.pair.1.name.is_empty());
    }

    let exhausted: Roster = factory.create_mock_object_with_depth(1).unwrap();
    assert!(exhausted.contacts.is_empty());
    assert!(exhausted.by_desk.is_empty());
}

#[test]
fn test_nested_object_list_exact_count_at_shallow_depth() {
    let factory = bare_factory();
    factory
        .registry()
        .configure::<Roster>(|b| b.for_nested_object_list::<Contact>("invited", 3));

    for _ in 0..10 {
        let roster: Roster = factory.create_mock_object_with_depth(2).unwrap();
        assert_eq!(roster.invited.len(), 3);
        assert!(roster.invited.iter().all(|c| !c.email.is_empty()));
    }
}

#[test]
fn test_collections_empty_at_exhausted_budget() {
    let factory = bare_factory();
    for depth in [0, 1] {
        let c: Collections = factory.create_mock_object_with_depth(depth).unwrap();
        assert!(c.list.is_empty());
        assert!(c.array.is_empty());
        assert!(c.set.is_empty());
        assert!(c.queue.is_empty());
        assert!(c.stack.is_empty());
        assert!(c.map.is_empty());
    }
}

#[test]
fn test_string_int_dictionary() {
    let factory = bare_factory();
    for _ in 0..20 {
        let tagged: Tagged = factory.create_mock_object().unwrap();
        assert_sized(tagged.tags.len(), "tags");
        assert!(tagged.tags.keys().all(|k| !k.is_empty()));
        assert!(tagged.tags.values().all(|v| (0..=100).contains(v)));
    }
}

#[test]
fn test_list_cardinality() {
    let factory = bare_factory();
    assert_eq!(factory.create_mock_objects::<Contact>(3).unwrap().len(), 3);
    assert_eq!(factory.create_mock_objects::<Contact>(5).unwrap().len(), 5);
    assert!(factory.create_mock_objects::<Contact>(0).unwrap().is_empty());
}

#[test]
fn test_concurrent_calls_share_factory() {
    let factory: Arc<MockFactory> = Arc::new(bare_factory());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || factory.create_mock_objects::<Contact>(10).unwrap())
        })
        .collect();

    for handle in handles {
        let contacts = handle.join().unwrap();
        assert_eq!(contacts.len(), 10);
        assert!(contacts.iter().all(|c| !c.name.is_empty()));
    }
}
